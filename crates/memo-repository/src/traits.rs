//! Store traits.

use memo_core::{FeedEntry, Interface, Memo, MemoId, MemoResult, NewMemo, User, UserId};
use async_trait::async_trait;

/// Direction of a neighbor lookup relative to an anchor memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    /// The closest memo created before the anchor.
    Older,
    /// The closest memo created after the anchor.
    Newer,
}

/// Relational store for users and memos.
///
/// Every read issued here is a store round trip; callers on hot paths go
/// through the cache layer in `memo-service` instead.
#[async_trait]
pub trait MemoStore: Interface + Send + Sync {
    /// Returns the full users table.
    async fn select_users(&self) -> MemoResult<Vec<User>>;

    /// Finds a user by username.
    async fn find_user_by_username(&self, username: &str) -> MemoResult<Option<User>>;

    /// Records a successful sign-in.
    async fn touch_last_access(&self, id: UserId) -> MemoResult<()>;

    /// Returns public memos joined with their authors, newest first.
    async fn select_public_memos_page(&self, offset: usize, limit: usize) -> MemoResult<Vec<FeedEntry>>;

    /// Counts public memos.
    async fn count_public_memos(&self) -> MemoResult<u64>;

    /// Inserts a memo and returns its assigned id.
    async fn insert_memo(&self, memo: &NewMemo) -> MemoResult<MemoId>;

    /// Finds a memo by id, regardless of visibility.
    async fn find_memo(&self, id: MemoId) -> MemoResult<Option<Memo>>;

    /// Finds the same author's memo adjacent to `anchor` in creation order.
    ///
    /// Private memos are only considered when `include_private` is set.
    async fn find_neighbor(&self, anchor: &Memo, direction: Neighbor, include_private: bool) -> MemoResult<Option<Memo>>;

    /// Lists every memo of a user, newest first.
    async fn select_memos_by_user(&self, user_id: UserId) -> MemoResult<Vec<Memo>>;

    /// Verifies the store answers queries.
    async fn health_check(&self) -> MemoResult<()>;
}
