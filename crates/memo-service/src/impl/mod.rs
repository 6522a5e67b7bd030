//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `memo_service.rs`).

pub mod memo_service_impl;

pub use memo_service_impl::MemoServiceComponent;
