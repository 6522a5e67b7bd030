//! Memo controller.

use crate::{
    extractors::{CurrentUser, OptionalUser, ValidatedJson},
    responses::{ok, see_other, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Router,
};
use memo_core::{MemoError, MemoId};
use memo_service::{CreateMemoRequest, MemoDetailResponse, MemoResponse, ViewerInfo};
use serde::Serialize;
use tracing::debug;

/// A memo page as rendered for the current viewer.
#[derive(Debug, Serialize)]
pub struct MemoView {
    #[serde(flatten)]
    pub detail: MemoDetailResponse,
    pub viewer: Option<ViewerInfo>,
}

/// The signed-in user's own memos.
#[derive(Debug, Serialize)]
pub struct MyPageView {
    pub viewer: ViewerInfo,
    pub memos: Vec<MemoResponse>,
}

/// Creates the memo router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/memo", post(create_memo))
        .route("/memo/:id", get(get_memo))
        .route("/mypage", get(my_page))
}

/// Memo detail with links to the author's adjacent memos.
async fn get_memo(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    OptionalUser(viewer): OptionalUser,
) -> ApiResult<MemoView> {
    let id: MemoId = raw.parse().map_err(|_| MemoError::not_found("Memo", &raw))?;
    debug!("Memo request: {}", id);

    let detail = state.memo_service.get_memo(viewer.as_ref().map(|v| v.id), id).await?;
    ok(MemoView { detail, viewer })
}

/// Posts a memo and redirects to it.
async fn create_memo(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateMemoRequest>,
) -> Result<Response, AppError> {
    debug!("Create memo request from: {}", user.username);

    let created = state.memo_service.create_memo(user.id, request).await?;
    Ok(see_other(format!("/memo/{}", created.id), created))
}

/// Every memo of the signed-in user.
async fn my_page(State(state): State<AppState>, CurrentUser(viewer): CurrentUser) -> ApiResult<MyPageView> {
    let memos = state.memo_service.list_own_memos(viewer.id).await?;
    ok(MyPageView { viewer, memos })
}
