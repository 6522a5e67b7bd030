//! Memo-related DTOs.

use chrono::{DateTime, Utc};
use memo_core::{FeedEntry, Memo, MemoId, Page, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A page of the public feed with pagination metadata.
pub type FeedResponse = Page<FeedEntry>;

/// New memo request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMemoRequest {
    #[validate(custom(function = "memo_core::rules::not_blank", message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub is_private: bool,
}

/// Outcome of a memo write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMemo {
    pub id: MemoId,

    /// False when the post-write cache invalidation failed; feed pages may
    /// be stale until the next successful write.
    pub cache_invalidated: bool,
}

/// Memo response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoResponse {
    pub id: MemoId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Memo> for MemoResponse {
    fn from(memo: Memo) -> Self {
        Self {
            id: memo.id,
            user_id: memo.user_id,
            title: memo.title,
            content: memo.content,
            is_private: memo.is_private,
            created_at: memo.created_at,
            updated_at: memo.updated_at,
        }
    }
}

/// Link to an adjacent memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoLink {
    pub id: MemoId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<Memo> for MemoLink {
    fn from(memo: Memo) -> Self {
        Self {
            id: memo.id,
            title: memo.title,
            created_at: memo.created_at,
        }
    }
}

/// Memo detail with navigation to the author's adjacent memos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoDetailResponse {
    pub memo: MemoResponse,

    /// Author's username; `None` if the author no longer resolves.
    pub username: Option<String>,

    pub older: Option<MemoLink>,
    pub newer: Option<MemoLink>,
}
