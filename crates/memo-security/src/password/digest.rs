//! Salted SHA-256 password digests.
//!
//! Stored hashes are the lowercase hex SHA-256 of `salt + password`.

use memo_core::Interface;
use sha2::{Digest, Sha256};
use shaku::Component;
use tracing::debug;

/// Interface for password verification.
pub trait PasswordVerifierInterface: Interface + Send + Sync {
    /// Computes the stored digest for a password.
    fn digest(&self, salt: &str, password: &str) -> String;

    /// Checks a password against a stored digest.
    fn verify(&self, password: &str, salt: &str, expected: &str) -> bool;
}

/// Salted SHA-256 password verifier.
#[derive(Component, Clone, Debug, Default)]
#[shaku(interface = PasswordVerifierInterface)]
pub struct PasswordDigest {}

impl PasswordDigest {
    /// Creates a new verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl PasswordVerifierInterface for PasswordDigest {
    fn digest(&self, salt: &str, password: &str) -> String {
        salted_sha256_hex(salt, password)
    }

    fn verify(&self, password: &str, salt: &str, expected: &str) -> bool {
        let actual = salted_sha256_hex(salt, password);
        let matched = constant_time_eq(actual.as_bytes(), expected.to_ascii_lowercase().as_bytes());
        debug!("Password verification {}", if matched { "succeeded" } else { "failed" });
        matched
    }
}

/// Returns `hex(sha256(salt + password))`.
#[must_use]
pub fn salted_sha256_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("") and sha256("abc") reference vectors
        assert_eq!(
            salted_sha256_hex("", ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            salted_sha256_hex("a", "bc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify() {
        let digest = PasswordDigest::new();
        let stored = digest.digest("pepper", "hunter2");

        assert!(digest.verify("hunter2", "pepper", &stored));
        assert!(digest.verify("hunter2", "pepper", &stored.to_uppercase()));
        assert!(!digest.verify("hunter3", "pepper", &stored));
        assert!(!digest.verify("hunter2", "salt", &stored));
        assert!(!digest.verify("hunter2", "pepper", ""));
    }
}
