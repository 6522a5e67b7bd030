//! MySQL store implementations.

mod memo_store;

pub use memo_store::*;
