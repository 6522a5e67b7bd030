//! Memo service implementation.

use crate::cache::KeyValueCache;
use crate::dto::{CreateMemoRequest, CreatedMemo, FeedResponse, MemoDetailResponse, MemoLink, MemoResponse};
use crate::memo_service::MemoService;
use crate::read_cache::{CountCache, FeedCache, IdentityResolver, InvalidationController};
use async_trait::async_trait;
use chrono::Utc;
use memo_core::{MemoError, MemoId, MemoResult, NewMemo, Page, PageRequest, UserId, ValidateExt};
use memo_repository::{MemoStore, Neighbor};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Memo service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = MemoService)]
pub struct MemoServiceComponent {
    #[shaku(inject)]
    store: Arc<dyn MemoStore>,
    #[shaku(inject)]
    cache: Arc<dyn KeyValueCache>,
}

impl MemoServiceComponent {
    /// Creates a memo service outside of a Shaku module.
    #[must_use]
    pub fn new(store: Arc<dyn MemoStore>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self { store, cache }
    }

    fn feed_cache(&self) -> FeedCache<'_> {
        FeedCache::new(self.store.as_ref(), self.cache.as_ref())
    }

    fn count_cache(&self) -> CountCache<'_> {
        CountCache::new(self.store.as_ref(), self.cache.as_ref())
    }

    fn identities(&self) -> IdentityResolver<'_> {
        IdentityResolver::new(self.store.as_ref(), self.cache.as_ref())
    }

    fn invalidation(&self) -> InvalidationController<'_> {
        InvalidationController::new(self.cache.as_ref())
    }
}

#[async_trait]
impl MemoService for MemoServiceComponent {
    async fn feed(&self, page_index: usize) -> MemoResult<FeedResponse> {
        debug!("Loading feed page {}", page_index);

        let rows = self.feed_cache().get_page(page_index).await?;
        if page_index > 0 && rows.is_empty() {
            return Err(MemoError::not_found("Feed page", page_index));
        }

        let total = self.count_cache().get_total().await?;
        Ok(Page::new(rows, page_index, PageRequest::FEED_SIZE, total))
    }

    async fn get_memo(&self, viewer: Option<UserId>, id: MemoId) -> MemoResult<MemoDetailResponse> {
        debug!("Getting memo: {}", id);

        let memo = self
            .store
            .find_memo(id)
            .await?
            .ok_or_else(|| MemoError::not_found("Memo", id))?;

        if !memo.is_visible_to(viewer) {
            debug!("Memo {} is private and hidden from {:?}", id, viewer);
            return Err(MemoError::not_found("Memo", id));
        }

        let include_private = memo.is_owned_by(viewer);
        let older = self.store.find_neighbor(&memo, Neighbor::Older, include_private).await?;
        let newer = self.store.find_neighbor(&memo, Neighbor::Newer, include_private).await?;
        let username = self.identities().resolve(memo.user_id).await?;

        Ok(MemoDetailResponse {
            memo: MemoResponse::from(memo),
            username,
            older: older.map(MemoLink::from),
            newer: newer.map(MemoLink::from),
        })
    }

    async fn create_memo(&self, author: UserId, request: CreateMemoRequest) -> MemoResult<CreatedMemo> {
        debug!("Creating memo for user: {}", author);

        request.validate_request()?;

        let new_memo = NewMemo::new(author, request.content, request.is_private, Utc::now());
        let id = self.store.insert_memo(&new_memo).await?;
        info!("Memo created: {} (user {}, private: {})", id, author, new_memo.is_private);

        let cache_invalidated = match self.invalidation().invalidate_all().await {
            Ok(_) => true,
            Err(e) => {
                warn!("Memo {} stored but feed caches may be stale: {}", id, e);
                false
            }
        };

        Ok(CreatedMemo { id, cache_invalidated })
    }

    async fn list_own_memos(&self, author: UserId) -> MemoResult<Vec<MemoResponse>> {
        debug!("Listing memos of user: {}", author);

        let memos = self.store.select_memos_by_user(author).await?;
        Ok(memos.into_iter().map(MemoResponse::from).collect())
    }

    async fn resolve_username(&self, id: UserId) -> MemoResult<Option<String>> {
        self.identities().resolve(id).await
    }

    async fn invalidate_feed(&self) -> MemoResult<usize> {
        self.invalidation().invalidate_all().await
    }

    async fn health_check(&self) -> MemoResult<()> {
        self.store.health_check().await
    }
}

impl std::fmt::Debug for MemoServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::testing::{minutes, InMemoryStore, ScriptedCache};

    struct Fixture {
        store: Arc<InMemoryStore>,
        cache: Arc<InMemoryCache>,
        service: MemoServiceComponent,
    }

    fn fixture(users: &[(i64, &str)]) -> Fixture {
        let store = Arc::new(InMemoryStore::with_users(users));
        let cache = Arc::new(InMemoryCache::new());
        let service = MemoServiceComponent::new(store.clone(), cache.clone());
        Fixture { store, cache, service }
    }

    fn public(content: &str) -> CreateMemoRequest {
        CreateMemoRequest {
            content: content.to_string(),
            is_private: false,
        }
    }

    fn private(content: &str) -> CreateMemoRequest {
        CreateMemoRequest {
            content: content.to_string(),
            is_private: true,
        }
    }

    #[tokio::test]
    async fn test_post_then_read_scenario() {
        let f = fixture(&[(1, "alice")]);

        let empty = f.service.feed(0).await.unwrap();
        assert_eq!(empty.info.total_elements, 0);
        assert!(empty.is_empty());

        let created = f.service.create_memo(UserId::new(1), public("hi\nthere")).await.unwrap();
        assert!(created.cache_invalidated);

        let page = f.service.feed(0).await.unwrap();
        assert_eq!(page.info.total_elements, 1);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].memo.content, "hi\nthere");
        assert_eq!(page.content[0].memo.title, "hi");
        assert_eq!(page.content[0].username, "alice");
        assert_eq!(page.content[0].memo.id, created.id);
    }

    #[tokio::test]
    async fn test_private_memo_leaves_count_and_feed_unchanged() {
        let f = fixture(&[(1, "alice")]);
        f.service.create_memo(UserId::new(1), public("one")).await.unwrap();
        assert_eq!(f.service.feed(0).await.unwrap().info.total_elements, 1);

        f.service.create_memo(UserId::new(1), private("secret")).await.unwrap();

        let page = f.service.feed(0).await.unwrap();
        assert_eq!(page.info.total_elements, 1);
        assert!(page.content.iter().all(|e| !e.memo.is_private));
    }

    #[tokio::test]
    async fn test_write_invalidates_cached_pages() {
        let f = fixture(&[(1, "alice")]);
        f.store.insert(1, "old", false, minutes(0));

        f.service.feed(0).await.unwrap();
        assert!(f.cache.contains("memo-page-0"));
        assert!(f.cache.contains("memo-total-count"));

        f.service.create_memo(UserId::new(1), public("new")).await.unwrap();
        assert!(!f.cache.contains("memo-page-0"));
        assert!(!f.cache.contains("memo-total-count"));

        let page = f.service.feed(0).await.unwrap();
        assert_eq!(page.content[0].memo.title, "new");
        assert_eq!(f.store.page_queries(), 2);
    }

    #[tokio::test]
    async fn test_repeated_reads_hit_cache() {
        let f = fixture(&[(1, "alice")]);
        f.store.insert(1, "a", false, minutes(0));

        let first = f.service.feed(0).await.unwrap();
        let second = f.service.feed(0).await.unwrap();
        assert_eq!(first.content, second.content);
        assert_eq!(f.store.page_queries(), 1);
        assert_eq!(f.store.count_queries(), 1);
    }

    #[tokio::test]
    async fn test_empty_first_page_is_not_an_error() {
        let f = fixture(&[]);
        let page = f.service.feed(0).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.info.page, 0);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_not_found() {
        let f = fixture(&[(1, "alice")]);
        for i in 0..100 {
            f.store.insert(1, &format!("memo {}", i), false, minutes(i));
        }

        let first = f.service.feed(0).await.unwrap();
        assert_eq!(first.len(), 100);
        assert!(!first.has_next());

        let err = f.service.feed(1).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_blank_content_is_rejected_before_insert() {
        let f = fixture(&[(1, "alice")]);
        let err = f.service.create_memo(UserId::new(1), public("  \n ")).await.unwrap_err();
        assert!(matches!(err, MemoError::Validation(_)));
        assert_eq!(f.store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_invalidation_keeps_the_write() {
        let store = Arc::new(InMemoryStore::with_users(&[(1, "alice")]));
        let cache = Arc::new(ScriptedCache::healthy());
        let service = MemoServiceComponent::new(store.clone(), cache.clone());

        service.feed(0).await.unwrap();
        cache.fail_deletes(true);

        let created = service.create_memo(UserId::new(1), public("hello")).await.unwrap();
        assert!(!created.cache_invalidated);
        assert_eq!(store.insert_calls(), 1);
        assert!(cache.inner().contains("memo-page-0"));

        assert_eq!(service.invalidate_feed().await.unwrap_err().error_code(), "CACHE_ERROR");
    }

    #[tokio::test]
    async fn test_unavailable_cache_serves_from_store() {
        let store = Arc::new(InMemoryStore::with_users(&[(1, "alice")]));
        store.insert(1, "hello", false, minutes(0));
        let cache = Arc::new(ScriptedCache::unavailable());
        let service = MemoServiceComponent::new(store.clone(), cache);

        let page = service.feed(0).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.info.total_elements, 1);

        let created = service.create_memo(UserId::new(1), public("again")).await.unwrap();
        assert!(!created.cache_invalidated);
        assert_eq!(service.feed(0).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let f = fixture(&[(1, "alice")]);
        f.store.set_unavailable(true);

        let err = f.service.feed(0).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(f.service.create_memo(UserId::new(1), public("x")).await.is_err());
    }

    #[tokio::test]
    async fn test_get_memo_privacy() {
        let f = fixture(&[(1, "alice"), (2, "bob")]);
        let secret = f.store.insert(1, "secret", true, minutes(0));

        assert!(f.service.get_memo(None, secret).await.unwrap_err().is_not_found());
        assert!(f.service.get_memo(Some(UserId::new(2)), secret).await.unwrap_err().is_not_found());

        let detail = f.service.get_memo(Some(UserId::new(1)), secret).await.unwrap();
        assert_eq!(detail.memo.title, "secret");
        assert_eq!(detail.username.as_deref(), Some("alice"));

        assert!(f.service.get_memo(None, MemoId::new(999)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_memo_navigation() {
        let f = fixture(&[(1, "alice"), (2, "bob")]);
        let first = f.store.insert(1, "first", false, minutes(0));
        let hidden = f.store.insert(1, "hidden", true, minutes(1));
        let middle = f.store.insert(1, "middle", false, minutes(2));
        f.store.insert(2, "other author", false, minutes(3));
        let last = f.store.insert(1, "last", false, minutes(4));

        let as_guest = f.service.get_memo(None, middle).await.unwrap();
        assert_eq!(as_guest.older.map(|l| l.id), Some(first));
        assert_eq!(as_guest.newer.map(|l| l.id), Some(last));

        let as_owner = f.service.get_memo(Some(UserId::new(1)), middle).await.unwrap();
        assert_eq!(as_owner.older.map(|l| l.id), Some(hidden));

        let edge = f.service.get_memo(None, last).await.unwrap();
        assert!(edge.newer.is_none());
        assert_eq!(edge.older.map(|l| l.id), Some(middle));
    }

    #[tokio::test]
    async fn test_detail_reads_do_not_touch_feed_cache() {
        let f = fixture(&[(1, "alice")]);
        let id = f.store.insert(1, "hello", false, minutes(0));

        f.service.get_memo(None, id).await.unwrap();
        assert_eq!(f.store.page_queries(), 0);
        assert!(!f.cache.contains("memo-page-0"));
    }

    #[tokio::test]
    async fn test_list_own_memos_includes_private() {
        let f = fixture(&[(1, "alice"), (2, "bob")]);
        f.store.insert(1, "public", false, minutes(0));
        f.store.insert(1, "private", true, minutes(1));
        f.store.insert(2, "bob's", false, minutes(2));

        let memos = f.service.list_own_memos(UserId::new(1)).await.unwrap();
        let titles: Vec<_> = memos.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["private", "public"]);
    }

    #[tokio::test]
    async fn test_resolve_username() {
        let f = fixture(&[(1, "alice")]);
        assert_eq!(f.service.resolve_username(UserId::new(1)).await.unwrap().as_deref(), Some("alice"));
        assert_eq!(f.service.resolve_username(UserId::new(5)).await.unwrap(), None);
        assert_eq!(f.store.select_users_calls(), 2);
    }

    #[tokio::test]
    async fn test_health_check_follows_store() {
        let f = fixture(&[]);
        assert!(f.service.health_check().await.is_ok());
        f.store.set_unavailable(true);
        assert!(f.service.health_check().await.is_err());
    }
}
