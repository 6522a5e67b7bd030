//! Paginated public feed cache.

use crate::cache::{cache_keys, CacheExt, KeyValueCache};
use memo_core::{FeedEntry, MemoResult, PageRequest};
use memo_repository::MemoStore;
use tracing::{debug, warn};

/// One cache entry per feed page, holding the joined query result.
///
/// Pages are always [`PageRequest::FEED_SIZE`] rows; the key carries only
/// the page index.
pub struct FeedCache<'a> {
    store: &'a dyn MemoStore,
    cache: &'a dyn KeyValueCache,
}

impl<'a> FeedCache<'a> {
    /// Creates a feed cache over the given store and cache.
    #[must_use]
    pub fn new(store: &'a dyn MemoStore, cache: &'a dyn KeyValueCache) -> Self {
        Self { store, cache }
    }

    /// Returns public memos for `page`, newest first.
    ///
    /// A page past the end of the feed is empty, not an error.
    pub async fn get_page(&self, page: usize) -> MemoResult<Vec<FeedEntry>> {
        let key = cache_keys::feed_page(page);

        match self.cache.get::<Vec<FeedEntry>>(&key).await {
            Ok(Some(rows)) => {
                debug!("Feed cache hit for page {}", page);
                return Ok(rows);
            }
            Ok(None) => debug!("Feed cache miss for page {}", page),
            Err(e) => warn!("Feed cache read failed for page {}, using store: {}", page, e),
        }

        let request = PageRequest::feed(page);
        let rows = self
            .store
            .select_public_memos_page(request.offset(), request.limit())
            .await?;

        if let Err(e) = self.cache.set(&key, &rows).await {
            warn!("Failed to cache feed page {}: {}", page, e);
        }

        Ok(rows)
    }
}
