//! Cache trait for abstracted key/value operations.

use async_trait::async_trait;
use memo_core::MemoResult;
use shaku::Interface;

/// Key/value cache with prefix enumeration.
///
/// Values are JSON strings so the trait stays dyn-compatible; use
/// [`CacheExt`] for typed access.
#[async_trait]
pub trait KeyValueCache: Interface + Send + Sync {
    /// Get a raw value. Returns `None` if the key is absent.
    async fn get_raw(&self, key: &str) -> MemoResult<Option<String>>;

    /// Set a raw value with no expiry.
    async fn set_raw(&self, key: &str, value: &str) -> MemoResult<()>;

    /// Delete a key. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> MemoResult<bool>;

    /// Lists every key starting with `prefix`.
    async fn keys_matching(&self, prefix: &str) -> MemoResult<Vec<String>>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods.
#[async_trait]
pub trait CacheExt: KeyValueCache {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> MemoResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> MemoResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json).await
    }
}

impl<T: KeyValueCache + ?Sized> CacheExt for T {}
