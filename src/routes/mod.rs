//! API route handlers - maps HTTP endpoints to the git entity sources.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Repository info and entry links (GET /api/v2/repository)
//! - `branches`: Paged branch collection, branch lookup/creation, branch history
//! - `changesets`: Paged HEAD history, single changesets and their parents
//! - `links`: URL construction shared by all of the above
//! - `extract`: the paging query extractor
//!
//! Every collection response is built by `hal::CollectionMapper`; the
//! modules only supply the item converter and the link templates.

pub mod branches;
pub mod changesets;
pub mod extract;
pub mod links;
pub mod repository;

pub use extract::PagingParams;
pub use links::ResourceLinks;

use axum::Router;

use crate::git::SharedRepo;

/// Settings the handlers need from the command line.
#[derive(Debug, Clone, Copy)]
pub struct ApiSettings {
    pub default_page_size: usize,
    /// Hides `create` links and rejects writes.
    pub read_only: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            read_only: false,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub repo: SharedRepo,
    pub links: ResourceLinks,
    pub settings: ApiSettings,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(repository::routes(state.clone()))
        .merge(branches::routes(state.clone()))
        .merge(changesets::routes(state))
}
