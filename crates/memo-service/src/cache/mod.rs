//! Key/value cache abstraction.
//!
//! The cache holds derived data only. Nothing in it is ever authoritative,
//! and entries have no TTL: they live until explicitly invalidated.

pub mod cache_keys;
mod key_value_cache;
mod memory_cache;
mod redis_cache;

pub use key_value_cache::{CacheExt, KeyValueCache};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
