//! Memo service trait definition.

use crate::dto::{CreateMemoRequest, CreatedMemo, FeedResponse, MemoDetailResponse, MemoResponse};
use async_trait::async_trait;
use memo_core::{Interface, MemoId, MemoResult, UserId};

/// Memo use cases.
///
/// Feed and count reads go through the read-path caches; detail pages and
/// "my page" read the store directly.
#[async_trait]
pub trait MemoService: Interface + Send + Sync {
    /// Returns one page of the public feed plus the public memo count.
    ///
    /// Page 0 always succeeds, even when empty. Any later page with no rows
    /// is `NotFound`.
    async fn feed(&self, page_index: usize) -> MemoResult<FeedResponse>;

    /// Returns a memo with links to the author's adjacent memos.
    ///
    /// Missing memos and private memos of other users are both `NotFound`.
    async fn get_memo(&self, viewer: Option<UserId>, id: MemoId) -> MemoResult<MemoDetailResponse>;

    /// Stores a new memo and invalidates the feed caches.
    async fn create_memo(&self, author: UserId, request: CreateMemoRequest) -> MemoResult<CreatedMemo>;

    /// Lists every memo of `author`, private ones included, newest first.
    async fn list_own_memos(&self, author: UserId) -> MemoResult<Vec<MemoResponse>>;

    /// Resolves a user id to a username through the identity cache.
    async fn resolve_username(&self, id: UserId) -> MemoResult<Option<String>>;

    /// Clears every feed page and the cached count.
    async fn invalidate_feed(&self) -> MemoResult<usize>;

    /// Checks that the store is reachable. The cache is not consulted.
    async fn health_check(&self) -> MemoResult<()>;
}
