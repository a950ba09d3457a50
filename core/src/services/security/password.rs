//! Password hashing with bcrypt

use crate::errors::{DomainError, DomainResult};

/// One-way password hasher with a tunable work factor
///
/// Every hash uses a fresh random salt, so hashing the same password twice
/// produces different digests that both verify.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes `plaintext` on the calling thread
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Hashing {
            message: e.to_string(),
        })
    }

    /// Checks `plaintext` against `digest`; a malformed digest never verifies
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        bcrypt::verify(plaintext, digest).unwrap_or(false)
    }

    /// Hashes `plaintext` on the blocking thread pool
    pub async fn hash_blocking(&self, plaintext: String) -> DomainResult<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| DomainError::Hashing {
                message: format!("Hashing task failed: {}", e),
            })?
    }
}
