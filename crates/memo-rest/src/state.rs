//! Application state for Axum handlers.

use memo_service::{AuthService, MemoService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub memo_service: Arc<dyn MemoService>,
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(memo_service: Arc<dyn MemoService>, auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            memo_service,
            auth_service,
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn MemoService> + HasComponent<dyn AuthService>,
    {
        Self::new(
            HasComponent::<dyn MemoService>::resolve(module),
            HasComponent::<dyn AuthService>::resolve(module),
        )
    }
}
