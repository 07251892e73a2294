//! Collection representations: a page (or a plain list) of items embedded
//! under one relation name, plus navigation links.
//!
//! `CollectionMapper` is the paged variant. It is configured per resource
//! with the embedded relation name, a self-link template and an optional
//! create link; the item converter is passed per call so the same mapper
//! shape serves every entity type.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::hal::LinkSet;
use crate::paging::{PageRequest, PageResult, PageSource, PagingQuery};

/// An item projection with its own links.
#[derive(Debug, Clone, Serialize)]
pub struct HalItem<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(rename = "_links")]
    pub links: LinkSet,
}

impl<T> HalItem<T> {
    pub fn new(item: T, links: LinkSet) -> Self {
        Self { item, links }
    }
}

/// Items embedded under a single relation name.
#[derive(Debug, Clone)]
pub struct Embedded<T> {
    relation: String,
    items: Vec<T>,
}

impl<T> Embedded<T> {
    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, relation: &str) -> Option<&[T]> {
        (self.relation == relation).then_some(self.items.as_slice())
    }
}

impl<T: Serialize> Serialize for Embedded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.relation, &self.items)?;
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDto<T> {
    pub page: usize,
    pub page_total: usize,
    #[serde(rename = "_links")]
    pub links: LinkSet,
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicCollectionDto<T> {
    #[serde(rename = "_links")]
    pub links: LinkSet,
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

fn check_relation(relation: &str) -> Result<()> {
    if relation.is_empty() {
        return Err(AppError::Internal(
            "collection relation name must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub struct CollectionMapper<F> {
    relation: String,
    self_link: F,
    create_link: Option<String>,
    extra_links: LinkSet,
}

impl<F> CollectionMapper<F>
where
    F: Fn(&PageRequest) -> String,
{
    /// `self_link` renders the URL of a page; it is used for every
    /// navigation link so they only differ in the page number.
    pub fn new(relation: impl Into<String>, self_link: F) -> Self {
        Self {
            relation: relation.into(),
            self_link,
            create_link: None,
            extra_links: LinkSet::new(),
        }
    }

    /// The caller decides whether creating is allowed; `None` omits the link.
    pub fn with_create_link(mut self, href: Option<String>) -> Self {
        self.create_link = href;
        self
    }

    pub fn with_links(mut self, links: LinkSet) -> Self {
        self.extra_links = self.extra_links.merge(links);
        self
    }

    pub fn map<E, T, C>(
        &self,
        request: &PageRequest,
        result: PageResult<E>,
        converter: C,
    ) -> Result<CollectionDto<T>>
    where
        C: Fn(&E) -> T,
    {
        check_relation(&self.relation)?;

        let page = request.page();
        let page_total = result.overall_page_count(request.page_size());
        let last_page = page_total.saturating_sub(1);

        let links = LinkSet::new()
            .add("self", (self.self_link)(request))
            .add("first", (self.self_link)(&request.at_page(0)))
            .add_if(page > 0, "prev", || {
                (self.self_link)(&request.at_page(page - 1))
            })
            .add_if(page + 1 < page_total, "next", || {
                (self.self_link)(&request.at_page(page + 1))
            })
            .add("last", (self.self_link)(&request.at_page(last_page)))
            .add_opt("create", self.create_link.clone())
            .merge(self.extra_links.clone());

        let items = result.entities.iter().map(converter).collect();

        Ok(CollectionDto {
            page,
            page_total,
            links,
            embedded: Embedded {
                relation: self.relation.clone(),
                items,
            },
        })
    }

    /// Validates the raw query, fetches the page and maps it.
    ///
    /// An invalid query fails before the source is asked for anything.
    pub fn fetch_and_map<E, T, S, C>(
        &self,
        query: PagingQuery,
        default_page_size: usize,
        source: &S,
        converter: C,
    ) -> Result<CollectionDto<T>>
    where
        S: PageSource<E> + ?Sized,
        C: Fn(&E) -> T,
    {
        let request = query.into_page_request(default_page_size)?;
        let result = source.fetch_page(&request)?;
        self.map(&request, result, converter)
    }
}

/// Non-paged collection: all items, a self link and an optional create link.
pub struct BasicCollectionMapper {
    relation: String,
    self_link: String,
    create_link: Option<String>,
}

impl BasicCollectionMapper {
    pub fn new(relation: impl Into<String>, self_link: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            self_link: self_link.into(),
            create_link: None,
        }
    }

    pub fn with_create_link(mut self, href: Option<String>) -> Self {
        self.create_link = href;
        self
    }

    pub fn map<E, T, C>(&self, entities: &[E], converter: C) -> Result<BasicCollectionDto<T>>
    where
        C: Fn(&E) -> T,
    {
        check_relation(&self.relation)?;

        let links = LinkSet::new()
            .add("self", self.self_link.clone())
            .add_opt("create", self.create_link.clone());

        Ok(BasicCollectionDto {
            links,
            embedded: Embedded {
                relation: self.relation.clone(),
                items: entities.iter().map(converter).collect(),
            },
        })
    }
}
