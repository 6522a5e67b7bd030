//! Store and cache test doubles.
//!
//! Compiled for this crate's tests and, with the `testing` feature, for the
//! tests of crates built on top of it.

use crate::cache::{InMemoryCache, KeyValueCache};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use memo_core::{FeedEntry, Memo, MemoError, MemoId, MemoResult, NewMemo, User, UserId};
use memo_repository::{MemoStore, Neighbor};
use memo_security::salted_sha256_hex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A fixed instant plus `n` minutes.
pub fn minutes(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n)
}

/// Password every seeded user signs in with.
pub const PASSWORD: &str = "password";

/// In-memory store that counts the queries the caches are meant to avoid.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    memos: Mutex<Vec<Memo>>,
    touched: Mutex<Vec<UserId>>,
    unavailable: AtomicBool,
    select_users_calls: AtomicUsize,
    page_queries: AtomicUsize,
    count_queries: AtomicUsize,
    insert_calls: AtomicUsize,
}

impl InMemoryStore {
    /// Creates a store holding `users`, each with [`PASSWORD`].
    pub fn with_users(users: &[(i64, &str)]) -> Self {
        let store = Self::default();
        for (id, name) in users {
            store.add_user(*id, name, PASSWORD);
        }
        store
    }

    pub fn add_user(&self, id: i64, username: &str, password: &str) {
        let salt = format!("salt-{}", id);
        let hash = salted_sha256_hex(&salt, password);
        self.users
            .lock()
            .unwrap()
            .push(User::new(UserId::new(id), username, hash, salt));
    }

    /// Inserts a memo without going through the counted store surface.
    pub fn insert(&self, user_id: i64, content: &str, is_private: bool, created_at: DateTime<Utc>) -> MemoId {
        self.push(&NewMemo::new(UserId::new(user_id), content, is_private, created_at))
    }

    fn push(&self, new_memo: &NewMemo) -> MemoId {
        let mut memos = self.memos.lock().unwrap();
        let id = MemoId::new(memos.len() as i64 + 1);
        memos.push(Memo {
            id,
            user_id: new_memo.user_id,
            content: new_memo.content.clone(),
            title: new_memo.title.clone(),
            is_private: new_memo.is_private,
            created_at: new_memo.created_at,
            updated_at: new_memo.created_at,
        });
        id
    }

    /// Makes every store call fail like a dropped connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn select_users_calls(&self) -> usize {
        self.select_users_calls.load(Ordering::SeqCst)
    }

    pub fn page_queries(&self) -> usize {
        self.page_queries.load(Ordering::SeqCst)
    }

    pub fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn touched(&self) -> Vec<UserId> {
        self.touched.lock().unwrap().clone()
    }

    fn check(&self) -> MemoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MemoError::Database("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MemoStore for InMemoryStore {
    async fn select_users(&self) -> MemoResult<Vec<User>> {
        self.check()?;
        self.select_users_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_user_by_username(&self, username: &str) -> MemoResult<Option<User>> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn touch_last_access(&self, id: UserId) -> MemoResult<()> {
        self.check()?;
        self.touched.lock().unwrap().push(id);
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_access = Some(Utc::now());
        }
        Ok(())
    }

    async fn select_public_memos_page(&self, offset: usize, limit: usize) -> MemoResult<Vec<FeedEntry>> {
        self.check()?;
        self.page_queries.fetch_add(1, Ordering::SeqCst);

        let users = self.users.lock().unwrap().clone();
        let mut public: Vec<Memo> = self
            .memos
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !m.is_private)
            .cloned()
            .collect();
        public.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(public
            .into_iter()
            .filter_map(|memo| {
                let username = users.iter().find(|u| u.id == memo.user_id)?.username.clone();
                Some(FeedEntry { memo, username })
            })
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count_public_memos(&self) -> MemoResult<u64> {
        self.check()?;
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.memos.lock().unwrap().iter().filter(|m| !m.is_private).count() as u64)
    }

    async fn insert_memo(&self, memo: &NewMemo) -> MemoResult<MemoId> {
        self.check()?;
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.push(memo))
    }

    async fn find_memo(&self, id: MemoId) -> MemoResult<Option<Memo>> {
        self.check()?;
        Ok(self.memos.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn find_neighbor(&self, anchor: &Memo, direction: Neighbor, include_private: bool) -> MemoResult<Option<Memo>> {
        self.check()?;
        let key = |m: &Memo| (m.created_at, m.id);
        let candidates = self.memos.lock().unwrap().clone().into_iter().filter(|m| {
            m.user_id == anchor.user_id && (include_private || !m.is_private)
        });

        Ok(match direction {
            Neighbor::Older => candidates.filter(|m| key(m) < key(anchor)).max_by_key(key),
            Neighbor::Newer => candidates.filter(|m| key(m) > key(anchor)).min_by_key(key),
        })
    }

    async fn select_memos_by_user(&self, user_id: UserId) -> MemoResult<Vec<Memo>> {
        self.check()?;
        let mut memos: Vec<Memo> = self
            .memos
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        memos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(memos)
    }

    async fn health_check(&self) -> MemoResult<()> {
        self.check()
    }
}

/// Cache wrapper whose operations can be made to fail.
#[derive(Default)]
pub struct ScriptedCache {
    inner: InMemoryCache,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
    fail_scans: AtomicBool,
}

impl ScriptedCache {
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Every operation fails, like an unreachable Redis.
    pub fn unavailable() -> Self {
        let cache = Self::default();
        cache.fail_reads.store(true, Ordering::SeqCst);
        cache.fail_writes.store(true, Ordering::SeqCst);
        cache.fail_deletes.store(true, Ordering::SeqCst);
        cache.fail_scans.store(true, Ordering::SeqCst);
        cache
    }

    pub fn inner(&self) -> &InMemoryCache {
        &self.inner
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    fn guard(flag: &AtomicBool, op: &str) -> MemoResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(MemoError::cache(format!("{} failed: connection refused", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueCache for ScriptedCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> MemoResult<Option<String>> {
        Self::guard(&self.fail_reads, "GET")?;
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str) -> MemoResult<()> {
        Self::guard(&self.fail_writes, "SET")?;
        self.inner.set_raw(key, value).await
    }

    async fn delete(&self, key: &str) -> MemoResult<bool> {
        Self::guard(&self.fail_deletes, "DEL")?;
        self.inner.delete(key).await
    }

    async fn keys_matching(&self, prefix: &str) -> MemoResult<Vec<String>> {
        Self::guard(&self.fail_scans, "SCAN")?;
        self.inner.keys_matching(prefix).await
    }
}
