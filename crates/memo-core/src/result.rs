//! Result type aliases for Memo Board.

use crate::MemoError;

/// A specialized `Result` type for memo operations.
pub type MemoResult<T> = Result<T, MemoError>;
