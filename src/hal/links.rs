use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Named links of a representation, kept in insertion order.
///
/// Serializes to `{"rel": {"href": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<(String, Link)>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link, replacing an existing one with the same relation in place.
    pub fn add(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.insert(rel, Link::new(href));
        self
    }

    pub fn add_if(self, condition: bool, rel: &str, href: impl FnOnce() -> String) -> Self {
        if condition { self.add(rel, href()) } else { self }
    }

    pub fn add_opt(self, rel: &str, href: Option<String>) -> Self {
        match href {
            Some(href) => self.add(rel, href),
            None => self,
        }
    }

    /// Adds every link of `other`; relations present in both take `other`'s href.
    pub fn merge(mut self, other: LinkSet) -> Self {
        for (rel, link) in other.links {
            self.insert(&rel, link);
        }
        self
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|(name, _)| name == rel)
            .map(|(_, link)| link)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|(rel, _)| rel.as_str())
    }

    fn insert(&mut self, rel: &str, link: Link) {
        match self.links.iter_mut().find(|(name, _)| name == rel) {
            Some((_, existing)) => *existing = link,
            None => self.links.push((rel.to_string(), link)),
        }
    }
}

impl Serialize for LinkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.links.len()))?;
        for (rel, link) in &self.links {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}
