//! # Memo Security
//!
//! Bearer tokens for signed-in users and the salted SHA-256 password
//! digests stored with each user.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
