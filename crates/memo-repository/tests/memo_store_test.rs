//! Integration tests for MySqlMemoStore.
//!
//! These tests run against a real MySQL database using testcontainers and
//! need Docker. Run them with `cargo test -- --ignored`.

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::TestDatabase;
use memo_core::{MemoId, NewMemo, UserId};
use memo_repository::{MemoStore, MySqlMemoStore, Neighbor};

fn at(minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap()
}

async fn insert(store: &MySqlMemoStore, user: UserId, content: &str, is_private: bool, minute: u32) -> MemoId {
    store
        .insert_memo(&NewMemo::new(user, content, is_private, at(minute)))
        .await
        .expect("Failed to insert memo")
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_memo() {
    let db = TestDatabase::new().await;
    let store = MySqlMemoStore::new(db.pool());
    let alice = db.insert_user("alice", "hash", "salt").await;

    let id = insert(&store, alice, "title line\nbody", false, 0).await;
    let memo = store.find_memo(id).await.unwrap().expect("memo not found");

    assert_eq!(memo.user_id, alice);
    assert_eq!(memo.title, "title line");
    assert_eq!(memo.content, "title line\nbody");
    assert!(!memo.is_private);
    assert_eq!(memo.created_at, at(0));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_memo_not_found() {
    let db = TestDatabase::new().await;
    let store = MySqlMemoStore::new(db.pool());

    assert!(store.find_memo(MemoId::new(9999)).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_public_feed_excludes_private_and_orders_newest_first() {
    let db = TestDatabase::new().await;
    let store = MySqlMemoStore::new(db.pool());
    let alice = db.insert_user("alice", "hash", "salt").await;
    let bob = db.insert_user("bob", "hash", "salt").await;

    insert(&store, alice, "first", false, 0).await;
    insert(&store, bob, "secret", true, 1).await;
    insert(&store, bob, "second", false, 2).await;
    insert(&store, alice, "third", false, 3).await;

    assert_eq!(store.count_public_memos().await.unwrap(), 3);

    let page = store.select_public_memos_page(0, 2).await.unwrap();
    let titles: Vec<_> = page.iter().map(|e| e.memo.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second"]);
    assert_eq!(page[1].username, "bob");

    let rest = store.select_public_memos_page(2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].memo.title, "first");

    assert!(store.select_public_memos_page(4, 2).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_neighbors_respect_visibility() {
    let db = TestDatabase::new().await;
    let store = MySqlMemoStore::new(db.pool());
    let alice = db.insert_user("alice", "hash", "salt").await;

    let oldest = insert(&store, alice, "oldest", false, 0).await;
    let hidden = insert(&store, alice, "hidden", true, 1).await;
    let middle = insert(&store, alice, "middle", false, 2).await;
    let newest = insert(&store, alice, "newest", false, 3).await;

    let anchor = store.find_memo(middle).await.unwrap().unwrap();

    let older_public = store.find_neighbor(&anchor, Neighbor::Older, false).await.unwrap().unwrap();
    assert_eq!(older_public.id, oldest);

    let older_owner = store.find_neighbor(&anchor, Neighbor::Older, true).await.unwrap().unwrap();
    assert_eq!(older_owner.id, hidden);

    let newer = store.find_neighbor(&anchor, Neighbor::Newer, false).await.unwrap().unwrap();
    assert_eq!(newer.id, newest);

    let last = store.find_memo(newest).await.unwrap().unwrap();
    assert!(store.find_neighbor(&last, Neighbor::Newer, true).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_memos_by_user_include_private() {
    let db = TestDatabase::new().await;
    let store = MySqlMemoStore::new(db.pool());
    let alice = db.insert_user("alice", "hash", "salt").await;
    let bob = db.insert_user("bob", "hash", "salt").await;

    insert(&store, alice, "public", false, 0).await;
    insert(&store, alice, "private", true, 1).await;
    insert(&store, bob, "other", false, 2).await;

    let memos = store.select_memos_by_user(alice).await.unwrap();
    let titles: Vec<_> = memos.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["private", "public"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_users_and_last_access() {
    let db = TestDatabase::new().await;
    let store = MySqlMemoStore::new(db.pool());
    let alice = db.insert_user("alice", "hash", "salt").await;
    db.insert_user("bob", "hash", "salt").await;

    let users = store.select_users().await.unwrap();
    assert_eq!(users.len(), 2);

    let before = Utc::now() - Duration::seconds(5);
    store.touch_last_access(alice).await.unwrap();

    let found = store.find_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, alice);
    assert_eq!(found.salt, "salt");
    assert!(found.last_access.unwrap() > before);

    assert!(store.find_user_by_username("nobody").await.unwrap().is_none());
}
