//! In-process cache backed by an ordered map.

use super::KeyValueCache;
use async_trait::async_trait;
use memo_core::MemoResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-process [`KeyValueCache`].
///
/// Keys are kept ordered so a prefix scan is a single range walk. Suitable
/// for tests and single-process deployments; state is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if `key` is cached.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}

#[async_trait]
impl KeyValueCache for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> MemoResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str) -> MemoResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> MemoResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    async fn keys_matching(&self, prefix: &str) -> MemoResult<Vec<String>> {
        let entries = self.entries.read();
        Ok(entries
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
