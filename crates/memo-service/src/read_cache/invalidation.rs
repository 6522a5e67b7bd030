//! Post-write cache invalidation.

use crate::cache::{cache_keys, KeyValueCache};
use memo_core::MemoResult;
use tracing::{debug, info, warn};

/// Clears every feed page and the public count after a memo write.
///
/// Identity entries live outside the invalidation prefix and are kept.
pub struct InvalidationController<'a> {
    cache: &'a dyn KeyValueCache,
}

impl<'a> InvalidationController<'a> {
    #[must_use]
    pub fn new(cache: &'a dyn KeyValueCache) -> Self {
        Self { cache }
    }

    /// Deletes every key under the invalidation prefix.
    ///
    /// Returns the number of deleted keys. The first failing scan or delete
    /// is returned as-is; keys not yet deleted stay stale until the next
    /// successful call.
    pub async fn invalidate_all(&self) -> MemoResult<usize> {
        let keys = self
            .cache
            .keys_matching(cache_keys::INVALIDATION_PREFIX)
            .await
            .map_err(|e| {
                warn!("Cache invalidation scan failed: {}", e);
                e
            })?;

        let mut deleted = 0;
        for key in &keys {
            self.cache.delete(key).await.map_err(|e| {
                warn!("Cache invalidation stopped at '{}' after {} keys: {}", key, deleted, e);
                e
            })?;
            debug!("Invalidated '{}'", key);
            deleted += 1;
        }

        info!("Invalidated {} feed cache entries", deleted);
        Ok(deleted)
    }
}
