//! # Memo Service
//!
//! Business logic for Memo Board: the public feed, memo detail pages,
//! posting, and sign-in.
//!
//! The read path never trusts the cache to be up: feed pages, the public
//! count, and user ids to usernames are served from the key/value cache
//! when present and rebuilt from the store otherwise. Every memo write
//! clears the feed caches.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod memo_service;
pub mod read_cache;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use memo_service::*;
pub use r#impl::*;
pub use read_cache::*;
