//! Memo entity and its derived read models.

use crate::{MemoId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A memo as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Unique identifier for the memo.
    pub id: MemoId,

    /// Owning user.
    pub user_id: UserId,

    /// Raw markdown content.
    pub content: String,

    /// First line of the content.
    pub title: String,

    /// Hidden from everyone but the owner when set.
    pub is_private: bool,

    /// Creation timestamp; drives feed and navigation order.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Memo {
    /// Checks whether `user_id` owns this memo.
    #[must_use]
    pub fn is_owned_by(&self, user_id: Option<UserId>) -> bool {
        user_id == Some(self.user_id)
    }

    /// Checks whether a viewer may read this memo.
    ///
    /// Public memos are visible to everyone, private ones only to the owner.
    #[must_use]
    pub fn is_visible_to(&self, viewer: Option<UserId>) -> bool {
        !self.is_private || self.is_owned_by(viewer)
    }
}

/// A feed row: a public memo joined with its author's username.
///
/// This is the unit cached per feed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub memo: Memo,

    /// Author's username at population time.
    pub username: String,
}

/// Insert payload for a new memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemo {
    pub user_id: UserId,
    pub content: String,
    pub title: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl NewMemo {
    /// Builds an insert payload, deriving the title from the content.
    #[must_use]
    pub fn new(user_id: UserId, content: impl Into<String>, is_private: bool, created_at: DateTime<Utc>) -> Self {
        let content = content.into();
        let title = derive_title(&content);
        Self {
            user_id,
            content,
            title,
            is_private,
            created_at,
        }
    }
}

/// Returns everything before the first `\n` in `content`. A `\r` before
/// the newline stays in the title.
#[must_use]
pub fn derive_title(content: &str) -> String {
    content
        .split('\n')
        .next()
        .unwrap_or_default()
        .to_string()
}
