//! User id to username resolution.

use crate::cache::{cache_keys, KeyValueCache};
use memo_core::{MemoResult, UserId};
use memo_repository::MemoStore;
use tracing::{debug, warn};

/// Resolves user ids to usernames through the cache.
///
/// Any miss reloads the whole users table and rewrites every `user-{id}`
/// entry. One expensive miss thereby removes all later misses until the
/// table changes. Unknown ids are never written, so an id that did not
/// exist at the last reload misses again and picks up users created since.
pub struct IdentityResolver<'a> {
    store: &'a dyn MemoStore,
    cache: &'a dyn KeyValueCache,
}

impl<'a> IdentityResolver<'a> {
    /// Creates a resolver over the given store and cache.
    #[must_use]
    pub fn new(store: &'a dyn MemoStore, cache: &'a dyn KeyValueCache) -> Self {
        Self { store, cache }
    }

    /// Returns the username for `id`, or `None` if no such user exists.
    pub async fn resolve(&self, id: UserId) -> MemoResult<Option<String>> {
        let key = cache_keys::user(id);

        match self.cache.get_raw(&key).await {
            Ok(Some(name)) => {
                debug!("Identity cache hit for user {}", id);
                return Ok(Some(name));
            }
            Ok(None) => debug!("Identity cache miss for user {}", id),
            Err(e) => warn!("Identity cache read failed for user {}, using store: {}", id, e),
        }

        self.repopulate(id).await
    }

    /// Reloads every user into the cache and returns the requested one.
    async fn repopulate(&self, requested: UserId) -> MemoResult<Option<String>> {
        let users = self.store.select_users().await?;
        debug!("Repopulating identity cache with {} users", users.len());

        let mut found = None;
        let mut cache_writable = true;
        for user in users {
            if cache_writable {
                if let Err(e) = self.cache.set_raw(&cache_keys::user(user.id), &user.username).await {
                    warn!("Identity cache repopulation aborted: {}", e);
                    cache_writable = false;
                }
            }
            if user.id == requested {
                found = Some(user.username);
            }
        }

        if found.is_none() {
            debug!("User {} not found after repopulation", requested);
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::testing::{InMemoryStore, ScriptedCache};

    #[tokio::test]
    async fn test_miss_repopulates_every_user() {
        let store = InMemoryStore::with_users(&[(1, "alice"), (2, "bob"), (3, "carol")]);
        let cache = InMemoryCache::new();
        let resolver = IdentityResolver::new(&store, &cache);

        assert_eq!(resolver.resolve(UserId::new(2)).await.unwrap().as_deref(), Some("bob"));
        assert_eq!(store.select_users_calls(), 1);
        assert!(cache.contains("user-1"));
        assert!(cache.contains("user-3"));

        assert_eq!(resolver.resolve(UserId::new(1)).await.unwrap().as_deref(), Some("alice"));
        assert_eq!(resolver.resolve(UserId::new(3)).await.unwrap().as_deref(), Some("carol"));
        assert_eq!(store.select_users_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_cached() {
        let store = InMemoryStore::with_users(&[(1, "alice")]);
        let cache = InMemoryCache::new();
        let resolver = IdentityResolver::new(&store, &cache);

        assert_eq!(resolver.resolve(UserId::new(99)).await.unwrap(), None);
        assert_eq!(store.select_users_calls(), 1);
        assert!(!cache.contains("user-99"));

        assert_eq!(resolver.resolve(UserId::new(1)).await.unwrap().as_deref(), Some("alice"));
        assert_eq!(store.select_users_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_resolves_once_user_is_created() {
        let store = InMemoryStore::with_users(&[(1, "alice")]);
        let cache = InMemoryCache::new();
        let resolver = IdentityResolver::new(&store, &cache);

        assert_eq!(resolver.resolve(UserId::new(2)).await.unwrap(), None);
        store.add_user(2, "bob", "secret");

        assert_eq!(resolver.resolve(UserId::new(2)).await.unwrap().as_deref(), Some("bob"));
        assert_eq!(resolver.resolve(UserId::new(2)).await.unwrap().as_deref(), Some("bob"));
        assert_eq!(store.select_users_calls(), 2);
    }

    #[tokio::test]
    async fn test_user_added_after_repopulation_misses_once() {
        let store = InMemoryStore::with_users(&[(1, "alice")]);
        let cache = InMemoryCache::new();
        let resolver = IdentityResolver::new(&store, &cache);

        resolver.resolve(UserId::new(1)).await.unwrap();
        store.add_user(2, "bob", "secret");

        assert_eq!(resolver.resolve(UserId::new(2)).await.unwrap().as_deref(), Some("bob"));
        assert_eq!(store.select_users_calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_store() {
        let store = InMemoryStore::with_users(&[(1, "alice")]);
        let cache = ScriptedCache::unavailable();
        let resolver = IdentityResolver::new(&store, &cache);

        assert_eq!(resolver.resolve(UserId::new(1)).await.unwrap().as_deref(), Some("alice"));
        assert_eq!(resolver.resolve(UserId::new(1)).await.unwrap().as_deref(), Some("alice"));
        assert_eq!(store.select_users_calls(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = InMemoryStore::with_users(&[(1, "alice")]);
        store.set_unavailable(true);
        let cache = InMemoryCache::new();
        let resolver = IdentityResolver::new(&store, &cache);

        let err = resolver.resolve(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, memo_core::MemoError::Database(_)));
    }
}
