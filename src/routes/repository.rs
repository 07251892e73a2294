use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::hal::{HalItem, LinkSet};
use crate::models::RepositoryDto;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v2/repository", get(get_repository_info))
        .with_state(state)
}

async fn get_repository_info(State(state): State<AppState>) -> Result<Json<HalItem<RepositoryDto>>> {
    let info = state.repo.info()?;
    let links = LinkSet::new()
        .add("self", state.links.repository())
        .add("branches", state.links.branches())
        .add("changesets", state.links.changesets());
    Ok(Json(HalItem::new(info, links)))
}
