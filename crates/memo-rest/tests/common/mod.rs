//! Shared fixtures for router tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use memo_config::{SecurityConfig, ServerConfig};
use memo_core::{MemoId, UserId};
use memo_rest::{create_router_with_state, AppState};
use memo_security::{PasswordDigest, TokenProvider, TokenProviderInterface};
use memo_service::testing::InMemoryStore;
use memo_service::{AuthServiceComponent, InMemoryCache, MemoServiceComponent};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub use memo_service::testing::PASSWORD;

/// A router wired to in-memory backends.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub tokens: Arc<TokenProvider>,
}

impl TestApp {
    pub fn new(users: &[(i64, &str)]) -> Self {
        let store = Arc::new(InMemoryStore::with_users(users));

        let security = SecurityConfig {
            jwt_secret: "router-test-secret-that-is-long-enough".to_string(),
            ..SecurityConfig::default()
        };
        let tokens = Arc::new(TokenProvider::new(Arc::new(security)));

        let memo_service = Arc::new(MemoServiceComponent::new(store.clone(), Arc::new(InMemoryCache::new())));
        let auth_service = Arc::new(AuthServiceComponent::new(
            store.clone(),
            Arc::new(PasswordDigest::default()),
            tokens.clone(),
        ));

        let router = create_router_with_state(AppState::new(memo_service, auth_service), &ServerConfig::default());
        Self { router, store, tokens }
    }

    /// Issues a token directly, bypassing sign-in.
    pub fn token_for(&self, id: i64, username: &str) -> String {
        self.tokens
            .generate_access_token(UserId::new(id), username)
            .unwrap()
            .access_token
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, location, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let (status, _, body) = self.send(builder.body(Body::empty()).unwrap()).await;
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Seeds a memo straight into the store.
    pub fn seed(&self, user_id: i64, content: &str, is_private: bool) -> MemoId {
        self.store.insert(user_id, content, is_private, Utc::now())
    }
}
