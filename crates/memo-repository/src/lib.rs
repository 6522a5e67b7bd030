//! # Memo Repository
//!
//! The relational store behind Memo Board.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn MemoStore>
//! MySqlMemoStore
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! Schema migrations live in the workspace `migrations/` directory and are
//! embedded at compile time.

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
