//! Authentication controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::post, Router};
use memo_service::{SignInRequest, SignInResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/signin", post(sign_in))
}

/// Sign in with username and password.
async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> ApiResult<SignInResponse> {
    debug!("Sign-in request for: {}", request.username);

    let response = state.auth_service.sign_in(request).await?;
    ok(response)
}
