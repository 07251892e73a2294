//! Branch endpoints.
//!
//! - GET /api/v2/repository/branches?page=&pageSize=&sortBy=&desc=
//!   Paged branch collection. `sortBy` is `name` (default) or `lastCommitDate`.
//!   Carries a `create` link unless the server is read-only.
//!
//! - POST /api/v2/repository/branches { name: string, parent?: string }
//!   Creates a branch at `parent` (branch or revision) or at HEAD.
//!
//! - GET /api/v2/repository/branches/{branch}
//!
//! - GET /api/v2/repository/branches/{branch}/changesets?page=&pageSize=
//!   Paged history of the branch.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::git::{BranchSource, LogSource};
use crate::hal::{CollectionDto, CollectionMapper, HalItem, LinkSet};
use crate::models::{Branch, BranchDto, BranchRequest, ChangesetDto};
use crate::paging::PageRequest;
use crate::routes::changesets::changeset_to_dto;
use crate::routes::{AppState, PagingParams, ResourceLinks};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v2/repository/branches",
            get(list_branches).post(create_branch),
        )
        .route("/api/v2/repository/branches/{branch}", get(get_branch))
        .route(
            "/api/v2/repository/branches/{branch}/changesets",
            get(branch_history),
        )
        .with_state(state)
}

pub fn branch_to_dto(links: &ResourceLinks, branch: &Branch) -> HalItem<BranchDto> {
    let item_links = LinkSet::new()
        .add("self", links.branch(&branch.name))
        .add("history", links.branch_history(&branch.name))
        .add("changeset", links.changeset(&branch.revision));
    HalItem::new(BranchDto::from(branch), item_links)
}

async fn list_branches(
    State(state): State<AppState>,
    PagingParams(query): PagingParams,
) -> Result<Json<CollectionDto<HalItem<BranchDto>>>> {
    tracing::debug!(?query, "Listing branches");
    let links = &state.links;

    let create_link = (!state.settings.read_only).then(|| links.branches());
    let mapper = CollectionMapper::new("branches", |request: &PageRequest| {
        links.branches_page(request)
    })
    .with_create_link(create_link);

    let collection = mapper.fetch_and_map(
        query,
        state.settings.default_page_size,
        &BranchSource::new(&state.repo),
        |branch| branch_to_dto(links, branch),
    )?;
    Ok(Json(collection))
}

async fn create_branch(
    State(state): State<AppState>,
    Json(request): Json<BranchRequest>,
) -> Result<impl IntoResponse> {
    if state.settings.read_only {
        return Err(AppError::ReadOnly);
    }

    let branch = state
        .repo
        .create_branch(&request.name, request.parent.as_deref())?;
    let location = state.links.branch(&branch.name);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(branch_to_dto(&state.links, &branch)),
    ))
}

async fn get_branch(
    State(state): State<AppState>,
    Path(branch): Path<String>,
) -> Result<Json<HalItem<BranchDto>>> {
    let branch = state.repo.branch(&branch)?;
    Ok(Json(branch_to_dto(&state.links, &branch)))
}

async fn branch_history(
    State(state): State<AppState>,
    Path(branch): Path<String>,
    PagingParams(query): PagingParams,
) -> Result<Json<CollectionDto<HalItem<ChangesetDto>>>> {
    tracing::debug!(%branch, ?query, "Listing branch history");
    let links = &state.links;

    let mapper = CollectionMapper::new("changesets", |request: &PageRequest| {
        links.branch_history_page(&branch, request)
    })
    .with_links(LinkSet::new().add("branch", links.branch(&branch)));

    let collection = mapper.fetch_and_map(
        query,
        state.settings.default_page_size,
        &LogSource::for_branch(&state.repo, branch.as_str()),
        |changeset| changeset_to_dto(links, changeset),
    )?;
    Ok(Json(collection))
}
