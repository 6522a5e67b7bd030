//! Signed-in viewer extractors.
//!
//! The auth middleware stores a [`ViewerInfo`] in the request extensions
//! once the bearer token is valid and its user still resolves.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use memo_core::MemoError;
use memo_service::ViewerInfo;

/// Extractor for a signed-in viewer. Rejects anonymous requests with 401.
pub struct CurrentUser(pub ViewerInfo);

impl std::ops::Deref for CurrentUser {
    type Target = ViewerInfo;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ViewerInfo>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError(MemoError::unauthorized("Sign in required")))
    }
}

/// Optional viewer extractor.
///
/// Returns `None` for anonymous requests instead of failing.
pub struct OptionalUser(pub Option<ViewerInfo>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(parts.extensions.get::<ViewerInfo>().cloned()))
    }
}
