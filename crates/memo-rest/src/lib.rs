//! # Memo REST
//!
//! REST API layer using Axum for Memo Board.
//! Serves the public feed, memo pages, posting, sign-in, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
