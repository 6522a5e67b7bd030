//! Authentication middleware.

use crate::responses::AppError;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use memo_security::Claims;
use memo_service::{AuthService, MemoService, ViewerInfo};
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub auth_service: Arc<dyn AuthService>,
    pub memo_service: Arc<dyn MemoService>,
}

impl AuthMiddlewareState {
    /// Creates the middleware state.
    pub fn new(auth_service: Arc<dyn AuthService>, memo_service: Arc<dyn MemoService>) -> Self {
        Self {
            auth_service,
            memo_service,
        }
    }

    /// Maps validated claims to a viewer, re-resolving the username.
    ///
    /// A user that no longer resolves is treated as anonymous.
    async fn viewer_for(&self, claims: &Claims) -> Result<Option<ViewerInfo>, AppError> {
        let Some(id) = claims.user_id() else {
            debug!("Token subject is not a user id: {}", claims.sub);
            return Ok(None);
        };

        let viewer = self
            .memo_service
            .resolve_username(id)
            .await?
            .map(|username| ViewerInfo { id, username });

        if viewer.is_none() {
            debug!("Token user {} no longer exists", id);
        }
        Ok(viewer)
    }
}

/// Returns the bearer token from the Authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

/// Authentication middleware that validates bearer tokens.
///
/// A valid token whose user still resolves adds a [`ViewerInfo`] to the
/// request extensions. Anything else leaves the request anonymous; handlers
/// decide whether sign-in is required.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(request.headers()) {
        match state.auth_service.validate_token(&token) {
            Ok(claims) => {
                if let Some(viewer) = state.viewer_for(&claims).await? {
                    debug!("Authenticated user: {}", viewer.username);
                    request.extensions_mut().insert(viewer);
                }
            }
            Err(e) => {
                debug!("Token validation failed: {}", e);
            }
        }
    }

    Ok(next.run(request).await)
}
