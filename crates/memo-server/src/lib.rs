//! # Memo Server Library
//!
//! Dependency injection wiring, logging setup, and startup helpers for the
//! Memo Board server binary.

pub mod di;
pub mod logging;
pub mod startup;
