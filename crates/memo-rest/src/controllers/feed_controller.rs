//! Public feed controller.

use crate::{
    extractors::OptionalUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use memo_core::PageRequest;
use memo_service::{FeedResponse, ViewerInfo};
use serde::Serialize;
use tracing::debug;

/// A feed page as rendered for the current viewer.
#[derive(Debug, Serialize)]
pub struct FeedView {
    #[serde(flatten)]
    pub feed: FeedResponse,
    pub viewer: Option<ViewerInfo>,
}

/// Creates the feed router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/recent/:page", get(recent))
}

/// First feed page.
async fn home(State(state): State<AppState>, OptionalUser(viewer): OptionalUser) -> ApiResult<FeedView> {
    render(&state, 0, viewer).await
}

/// Feed page by index. Anything that is not a non-negative integer is page 0.
async fn recent(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    OptionalUser(viewer): OptionalUser,
) -> ApiResult<FeedView> {
    let page = PageRequest::parse_index(&raw);
    debug!("Feed request for page '{}' -> {}", raw, page);
    render(&state, page, viewer).await
}

async fn render(state: &AppState, page: usize, viewer: Option<ViewerInfo>) -> ApiResult<FeedView> {
    let feed = state.memo_service.feed(page).await?;
    ok(FeedView { feed, viewer })
}
