//! Custom Axum extractors.

mod validated;
mod viewer;

pub use validated::*;
pub use viewer::*;
