//! CSRF protection

use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub fn generate_csrf_token() -> String {
    let token: [u8; 32] = rand::rng().random();
    hex::encode(token)
}

/// Compares in constant time. Digests are compared so that length differences
/// do not short-circuit.
pub fn validate_csrf_token(token: &str, expected: &str) -> bool {
    if token.is_empty() || expected.is_empty() {
        return false;
    }
    let submitted = Sha256::digest(token.as_bytes());
    let stored = Sha256::digest(expected.as_bytes());
    submitted.as_slice().ct_eq(stored.as_slice()).into()
}
