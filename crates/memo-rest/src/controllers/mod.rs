//! REST API controllers.

pub mod auth_controller;
pub mod feed_controller;
pub mod health_controller;
pub mod memo_controller;

pub use health_controller::*;
