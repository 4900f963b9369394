//! Password hashing with bcrypt
//!
//! Stored admin hashes use the `$2y$` prefix, which bcrypt verifies natively.

use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Verification failed")]
    VerificationFailed,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        hash(password, DEFAULT_COST).map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        verify(password, hash).map_err(|e| PasswordError::HashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = PasswordService::hash("admin123").unwrap();
        assert!(PasswordService::verify("admin123", &hashed).unwrap());
        assert!(!PasswordService::verify("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_verify_2y_prefix() {
        let hashed = PasswordService::hash("secret").unwrap();
        let legacy = hashed.replacen("$2b$", "$2y$", 1);
        assert!(PasswordService::verify("secret", &legacy).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(PasswordService::verify("secret", "not-a-hash").is_err());
    }
}
