//! Cache key generators.
//!
//! Every feed-derived key starts with [`INVALIDATION_PREFIX`] so one prefix
//! scan after a write clears all of them. Identity keys live outside that
//! namespace and survive memo writes.

use memo_core::UserId;

/// Prefix shared by every entry cleared after a memo write.
pub const INVALIDATION_PREFIX: &str = "memo";

/// Key holding the public memo count.
pub const TOTAL_COUNT: &str = "memo-total-count";

/// Key for a user's display name.
#[must_use]
pub fn user(id: UserId) -> String {
    format!("user-{}", id)
}

/// Key for one page of the public feed.
#[must_use]
pub fn feed_page(page: usize) -> String {
    format!("memo-page-{}", page)
}
