//! Main application router.

use crate::{
    controllers::{auth_controller, feed_controller, health_controller, memo_controller},
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    state::AppState,
};
use axum::{middleware, Router};
use memo_config::ServerConfig;
use memo_service::{AuthService, MemoService};
use shaku::{HasComponent, Module};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router from a Shaku module.
///
/// The module must provide the `MemoService` and `AuthService` components.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module + HasComponent<dyn MemoService> + HasComponent<dyn AuthService>,
{
    create_router_with_state(AppState::from_module(module), server_config)
}

/// Creates the main application router from prepared state.
pub fn create_router_with_state(state: AppState, server_config: &ServerConfig) -> Router {
    let auth_state = AuthMiddlewareState::new(state.auth_service.clone(), state.memo_service.clone());

    let app_router = Router::new()
        .merge(feed_controller::router())
        .merge(memo_controller::router())
        .merge(auth_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state.clone());

    let router = Router::new()
        // Health endpoints (no auth required)
        .merge(health_controller::router().with_state(state))
        .merge(app_router)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with feed, memo, sign-in and health endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}
