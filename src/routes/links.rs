//! URL construction for every resource the API exposes.
//!
//! Handlers and item converters never format paths themselves; they ask
//! `ResourceLinks`, so a resource is addressed the same way in every
//! representation that links to it.

use url::form_urlencoded;

use crate::paging::PageRequest;

pub const API_ROOT: &str = "/api/v2/repository";

#[derive(Debug, Clone, Default)]
pub struct ResourceLinks {
    base: String,
}

impl ResourceLinks {
    /// `base_url` is prepended to every link; empty yields absolute paths.
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn repository(&self) -> String {
        format!("{}{}", self.base, API_ROOT)
    }

    pub fn branches(&self) -> String {
        format!("{}/branches", self.repository())
    }

    pub fn branches_page(&self, request: &PageRequest) -> String {
        with_paging(self.branches(), request)
    }

    pub fn branch(&self, name: &str) -> String {
        format!("{}/{}", self.branches(), encode_segment(name))
    }

    pub fn branch_history(&self, name: &str) -> String {
        format!("{}/changesets", self.branch(name))
    }

    pub fn branch_history_page(&self, name: &str, request: &PageRequest) -> String {
        with_paging(self.branch_history(name), request)
    }

    pub fn changesets(&self) -> String {
        format!("{}/changesets", self.repository())
    }

    pub fn changesets_page(&self, request: &PageRequest) -> String {
        with_paging(self.changesets(), request)
    }

    pub fn changeset(&self, id: &str) -> String {
        format!("{}/{}", self.changesets(), encode_segment(id))
    }

    pub fn changeset_parents(&self, id: &str) -> String {
        format!("{}/parents", self.changeset(id))
    }
}

fn with_paging(href: String, request: &PageRequest) -> String {
    let mut href = format!(
        "{}?page={}&pageSize={}",
        href,
        request.page(),
        request.page_size()
    );
    if let Some(sort_by) = request.sort_by() {
        href.push_str("&sortBy=");
        href.extend(form_urlencoded::byte_serialize(sort_by.as_bytes()));
    }
    // Descending applies to the default key too.
    if request.descending() {
        href.push_str("&desc=true");
    }
    href
}

/// Percent-encodes one path segment; `/` in branch names becomes `%2F`.
fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_absolute_paths_by_default() {
        let links = ResourceLinks::new("");
        assert_eq!(links.repository(), "/api/v2/repository");
        assert_eq!(links.branch("main"), "/api/v2/repository/branches/main");
        assert_eq!(
            links.changeset_parents("abc"),
            "/api/v2/repository/changesets/abc/parents"
        );
    }

    #[test]
    fn prefixes_base_url() {
        let links = ResourceLinks::new("https://scm.example.com/");
        assert_eq!(
            links.branches(),
            "https://scm.example.com/api/v2/repository/branches"
        );
    }

    #[test]
    fn encodes_branch_names() {
        let links = ResourceLinks::new("");
        assert_eq!(
            links.branch_history("feature/login"),
            "/api/v2/repository/branches/feature%2Flogin/changesets"
        );
        assert_eq!(links.branch("a+b"), "/api/v2/repository/branches/a%2Bb");
    }

    #[test]
    fn page_links_carry_paging_and_sorting() {
        let links = ResourceLinks::new("");
        let request = PageRequest::new(2, 5).unwrap();
        assert_eq!(
            links.changesets_page(&request),
            "/api/v2/repository/changesets?page=2&pageSize=5"
        );

        let sorted = request.clone().with_sort(Some("lastCommitDate".to_string()), true);
        assert_eq!(
            links.branches_page(&sorted),
            "/api/v2/repository/branches?page=2&pageSize=5&sortBy=lastCommitDate&desc=true"
        );

        let ascending = request.clone().with_sort(Some("name".to_string()), false);
        assert_eq!(
            links.branches_page(&ascending),
            "/api/v2/repository/branches?page=2&pageSize=5&sortBy=name"
        );
    }

    #[test]
    fn page_links_keep_descending_without_sort_key() {
        let links = ResourceLinks::new("");
        let request = PageRequest::new(0, 2).unwrap().with_sort(None, true);
        assert_eq!(
            links.branches_page(&request.at_page(1)),
            "/api/v2/repository/branches?page=1&pageSize=2&desc=true"
        );
    }
}
