//! Changeset endpoints.
//!
//! - GET /api/v2/repository/changesets?page=&pageSize=
//!   Paged history of HEAD, newest first, with a `branch` link when HEAD is
//!   on a branch. `sortBy` and `desc` are rejected.
//!
//! - GET /api/v2/repository/changesets/{id}
//!
//! - GET /api/v2/repository/changesets/{id}/parents
//!   Parents of a changeset as a plain (non-paged) collection.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::git::{ensure_history_order, LogSource};
use crate::hal::{
    BasicCollectionDto, BasicCollectionMapper, CollectionDto, CollectionMapper, HalItem, LinkSet,
};
use crate::models::{Changeset, ChangesetDto};
use crate::paging::PageRequest;
use crate::routes::{AppState, PagingParams, ResourceLinks};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v2/repository/changesets", get(list_changesets))
        .route("/api/v2/repository/changesets/{id}", get(get_changeset))
        .route("/api/v2/repository/changesets/{id}/parents", get(list_parents))
        .with_state(state)
}

pub fn changeset_to_dto(links: &ResourceLinks, changeset: &Changeset) -> HalItem<ChangesetDto> {
    let item_links = LinkSet::new()
        .add("self", links.changeset(&changeset.id))
        .add_opt(
            "parent",
            changeset.parents.first().map(|parent| links.changeset(parent)),
        )
        .add("parents", links.changeset_parents(&changeset.id));
    HalItem::new(ChangesetDto::from(changeset), item_links)
}

async fn list_changesets(
    State(state): State<AppState>,
    PagingParams(query): PagingParams,
) -> Result<Json<CollectionDto<HalItem<ChangesetDto>>>> {
    tracing::debug!(?query, "Listing changesets");
    let links = &state.links;

    let request = query.into_page_request(state.settings.default_page_size)?;
    ensure_history_order(&request)?;
    let log = LogSource::head(&state.repo)
        .command()
        .paged(&request)
        .changesets()?;

    let branch_link = log
        .branch_name
        .as_deref()
        .filter(|_| log.total > 0)
        .map(|branch| links.branch(branch));
    let mapper = CollectionMapper::new("changesets", |request: &PageRequest| {
        links.changesets_page(request)
    })
    .with_links(LinkSet::new().add_opt("branch", branch_link));

    let collection = mapper.map(&request, log.into_page_result(), |changeset| {
        changeset_to_dto(links, changeset)
    })?;
    Ok(Json(collection))
}

async fn get_changeset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HalItem<ChangesetDto>>> {
    let changeset = state.repo.changeset(&id)?;
    Ok(Json(changeset_to_dto(&state.links, &changeset)))
}

async fn list_parents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BasicCollectionDto<HalItem<ChangesetDto>>>> {
    let links = &state.links;
    let parents = state.repo.parents(&id)?;

    let collection = BasicCollectionMapper::new("changesets", links.changeset_parents(&id))
        .map(&parents, |changeset| changeset_to_dto(links, changeset))?;
    Ok(Json(collection))
}
