//! Page requests, page results and the entity source contract.
//!
//! A `PageRequest` can only be obtained through validation, so everything
//! downstream of it (entity sources, the collection mapper) works on
//! non-negative page numbers and page sizes of at least one.

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Number of pages needed to hold `total` entities, `0` when there are none.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
    sort_by: Option<String>,
    descending: bool,
}

impl PageRequest {
    /// Validates raw page parameters as received from a client.
    pub fn new(page: i64, page_size: i64) -> Result<Self> {
        if page < 0 {
            return Err(AppError::InvalidPageRequest(format!(
                "page must not be negative, got {}",
                page
            )));
        }
        if page_size < 1 {
            return Err(AppError::InvalidPageRequest(format!(
                "pageSize must be at least 1, got {}",
                page_size
            )));
        }

        let page = usize::try_from(page)
            .map_err(|_| AppError::InvalidPageRequest(format!("page {} is out of range", page)))?;
        let page_size = usize::try_from(page_size).map_err(|_| {
            AppError::InvalidPageRequest(format!("pageSize {} is out of range", page_size))
        })?;

        Ok(Self {
            page,
            page_size,
            sort_by: None,
            descending: false,
        })
    }

    pub fn with_sort(mut self, sort_by: Option<String>, descending: bool) -> Self {
        self.sort_by = sort_by.filter(|key| !key.is_empty());
        self.descending = descending;
        self
    }

    /// Same size and sort order, different page.
    pub fn at_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn descending(&self) -> bool {
        self.descending
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }
}

/// Query parameters accepted by every paged collection endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingQuery {
    #[serde(default)]
    pub page: i64,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

impl PagingQuery {
    pub fn into_page_request(self, default_page_size: usize) -> Result<PageRequest> {
        let page_size = match self.page_size {
            Some(size) => size,
            None => i64::try_from(default_page_size).unwrap_or(i64::MAX),
        };
        Ok(PageRequest::new(self.page, page_size)?.with_sort(self.sort_by, self.desc))
    }
}

/// A bounded slice of entities plus the number of entities in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<E> {
    pub entities: Vec<E>,
    pub total_count: usize,
}

impl<E> PageResult<E> {
    pub fn new(entities: Vec<E>, total_count: usize) -> Self {
        Self {
            entities,
            total_count,
        }
    }

    /// Cuts the requested page out of a fully materialized, already ordered list.
    pub fn slice(all: Vec<E>, request: &PageRequest) -> Self {
        let total_count = all.len();
        let entities = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self::new(entities, total_count)
    }

    pub fn overall_page_count(&self, page_size: usize) -> usize {
        page_count(self.total_count, page_size)
    }

    pub fn map<T, F: FnMut(E) -> T>(self, f: F) -> PageResult<T> {
        PageResult {
            entities: self.entities.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

/// Anything that can hand out one page of its entities.
pub trait PageSource<E> {
    fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<E>>;
}
