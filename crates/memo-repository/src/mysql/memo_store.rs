//! MySQL memo store implementation.

use crate::{traits::MemoStore, DatabasePoolInterface, Neighbor};
use memo_core::{FeedEntry, Memo, MemoError, MemoId, MemoResult, NewMemo, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const MEMO_COLUMNS: &str = "id, user_id, content, title, is_private, created_at, updated_at";

/// MySQL memo store.
#[derive(Component, Clone)]
#[shaku(interface = MemoStore)]
pub struct MySqlMemoStore {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlMemoStore {
    /// Creates a new MySQL memo store.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    salt: String,
    last_access: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            salt: row.salt,
            last_access: row.last_access,
        }
    }
}

/// Database row representation of a memo.
#[derive(Debug, FromRow)]
struct MemoRow {
    id: i64,
    user_id: i64,
    content: String,
    title: String,
    is_private: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemoRow> for Memo {
    fn from(row: MemoRow) -> Self {
        Self {
            id: MemoId::new(row.id),
            user_id: UserId::new(row.user_id),
            content: row.content,
            title: row.title,
            is_private: row.is_private,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A memo row joined with its author.
#[derive(Debug, FromRow)]
struct FeedRow {
    #[sqlx(flatten)]
    memo: MemoRow,
    username: String,
}

impl From<FeedRow> for FeedEntry {
    fn from(row: FeedRow) -> Self {
        Self {
            memo: row.memo.into(),
            username: row.username,
        }
    }
}

/// Builds the query for the nearest memo of the same author.
///
/// Ties on `created_at` are broken by id so navigation never skips or
/// repeats a memo.
fn neighbor_query(direction: Neighbor, include_private: bool) -> String {
    let (cmp, order) = match direction {
        Neighbor::Older => ("<", "DESC"),
        Neighbor::Newer => (">", "ASC"),
    };
    let visibility = if include_private { "" } else { " AND is_private = FALSE" };

    format!(
        "SELECT {MEMO_COLUMNS} FROM memos \
         WHERE user_id = ? AND (created_at {cmp} ? OR (created_at = ? AND id {cmp} ?)){visibility} \
         ORDER BY created_at {order}, id {order} LIMIT 1"
    )
}

#[async_trait]
impl MemoStore for MySqlMemoStore {
    async fn select_users(&self) -> MemoResult<Vec<User>> {
        debug!("Selecting all users");

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, salt, last_access FROM users",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_user_by_username(&self, username: &str) -> MemoResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, salt, last_access FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn touch_last_access(&self, id: UserId) -> MemoResult<()> {
        debug!("Touching last_access for user: {}", id);

        sqlx::query("UPDATE users SET last_access = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(())
    }

    async fn select_public_memos_page(&self, offset: usize, limit: usize) -> MemoResult<Vec<FeedEntry>> {
        debug!("Selecting public memos: offset={}, limit={}", offset, limit);

        let rows = sqlx::query_as::<_, FeedRow>(
            r#"
            SELECT m.id, m.user_id, m.content, m.title, m.is_private,
                   m.created_at, m.updated_at, u.username
            FROM memos m
            JOIN users u ON u.id = m.user_id
            WHERE m.is_private = FALSE
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit as u64)
        .bind(offset as u64)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(FeedEntry::from).collect())
    }

    async fn count_public_memos(&self) -> MemoResult<u64> {
        debug!("Counting public memos");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memos WHERE is_private = FALSE")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count.unsigned_abs())
    }

    async fn insert_memo(&self, memo: &NewMemo) -> MemoResult<MemoId> {
        debug!("Inserting memo for user: {}", memo.user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO memos (user_id, content, title, is_private, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(memo.user_id.into_inner())
        .bind(&memo.content)
        .bind(&memo.title)
        .bind(memo.is_private)
        .bind(memo.created_at)
        .bind(memo.created_at)
        .execute(self.pool.inner())
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| MemoError::Database(format!("Invalid insert id: {}", e)))?;
        Ok(MemoId::new(id))
    }

    async fn find_memo(&self, id: MemoId) -> MemoResult<Option<Memo>> {
        debug!("Finding memo by id: {}", id);

        let row = sqlx::query_as::<_, MemoRow>(&format!("SELECT {MEMO_COLUMNS} FROM memos WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Memo::from))
    }

    async fn find_neighbor(&self, anchor: &Memo, direction: Neighbor, include_private: bool) -> MemoResult<Option<Memo>> {
        debug!("Finding {:?} neighbor of memo {}", direction, anchor.id);

        let sql = neighbor_query(direction, include_private);
        let row = sqlx::query_as::<_, MemoRow>(&sql)
            .bind(anchor.user_id.into_inner())
            .bind(anchor.created_at)
            .bind(anchor.created_at)
            .bind(anchor.id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Memo::from))
    }

    async fn select_memos_by_user(&self, user_id: UserId) -> MemoResult<Vec<Memo>> {
        debug!("Listing memos for user: {}", user_id);

        let rows = sqlx::query_as::<_, MemoRow>(&format!(
            "SELECT {MEMO_COLUMNS} FROM memos WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Memo::from).collect())
    }

    async fn health_check(&self) -> MemoResult<()> {
        self.pool.health_check().await
    }
}
