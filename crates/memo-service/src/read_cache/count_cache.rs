//! Cached public memo count.

use crate::cache::{cache_keys, CacheExt, KeyValueCache};
use memo_core::MemoResult;
use memo_repository::MemoStore;
use tracing::{debug, warn};

/// Single cached scalar: the number of public memos.
pub struct CountCache<'a> {
    store: &'a dyn MemoStore,
    cache: &'a dyn KeyValueCache,
}

impl<'a> CountCache<'a> {
    #[must_use]
    pub fn new(store: &'a dyn MemoStore, cache: &'a dyn KeyValueCache) -> Self {
        Self { store, cache }
    }

    /// Returns the public memo count.
    pub async fn get_total(&self) -> MemoResult<u64> {
        match self.cache.get::<u64>(cache_keys::TOTAL_COUNT).await {
            Ok(Some(total)) => {
                debug!("Count cache hit: {}", total);
                return Ok(total);
            }
            Ok(None) => debug!("Count cache miss"),
            Err(e) => warn!("Count cache read failed, using store: {}", e),
        }

        let total = self.store.count_public_memos().await?;
        if let Err(e) = self.cache.set(cache_keys::TOTAL_COUNT, &total).await {
            warn!("Failed to cache memo count: {}", e);
        }

        Ok(total)
    }
}
