//! Read-path caches over the store.
//!
//! Each component borrows the store and the key/value cache for one call, so
//! they are cheap to build per request. Reads fail open: a cache error is
//! logged and treated as a miss. Only invalidation surfaces cache errors.

mod count_cache;
mod feed_cache;
mod identity_resolver;
mod invalidation;

pub use count_cache::CountCache;
pub use feed_cache::FeedCache;
pub use identity_resolver::IdentityResolver;
pub use invalidation::InvalidationController;
