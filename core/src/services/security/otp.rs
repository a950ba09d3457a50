//! One-time passcode generation

use rand::{rngs::OsRng, RngCore};

use crate::errors::{DomainError, DomainResult};

/// Bytes at or above this value are discarded so `byte % 10` stays uniform
const REJECTION_THRESHOLD: u8 = 250;

/// Generator of fixed-length numeric codes
///
/// Every digit is drawn independently from the OS CSPRNG using rejection
/// sampling, so each position is uniform over `0-9`.
#[derive(Debug, Clone, Copy)]
pub struct OtpGenerator {
    length: usize,
}

impl OtpGenerator {
    /// Creates a generator producing codes of `length` digits
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generates a new code
    ///
    /// # Errors
    ///
    /// `DomainError::Internal` if the entropy source fails
    pub fn generate(&self) -> DomainResult<String> {
        let mut rng = OsRng;
        let mut code = String::with_capacity(self.length);
        let mut buffer = [0u8; 16];

        while code.len() < self.length {
            rng.try_fill_bytes(&mut buffer).map_err(|e| DomainError::Internal {
                message: format!("Entropy source failure: {}", e),
            })?;

            for byte in buffer {
                if byte >= REJECTION_THRESHOLD {
                    continue;
                }
                code.push(char::from(b'0' + byte % 10));
                if code.len() == self.length {
                    break;
                }
            }
        }

        Ok(code)
    }
}
