//! User entity.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered author.
///
/// Users are created out of band; the service only reads them and touches
/// `last_access` on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username.
    pub username: String,

    /// Hex SHA-256 digest of `salt + password` (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Per-user salt (never exposed via API).
    #[serde(skip_serializing, default)]
    pub salt: String,

    /// Last successful sign-in.
    pub last_access: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, password_hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            salt: salt.into(),
            last_access: None,
        }
    }
}
