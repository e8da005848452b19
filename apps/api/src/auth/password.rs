use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::AppError;

/// Hashes a plaintext password with Argon2id and a fresh random salt.
pub fn hash(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored hash.
/// An unparseable stored hash counts as a mismatch, not an error.
pub fn verify(plain: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hashed = hash("hunter2-but-longer").unwrap();
        assert!(verify("hunter2-but-longer", &hashed));
    }

    #[test]
    fn test_wrong_password_fails_verification() {
        let hashed = hash("correct-password").unwrap();
        assert!(!verify("wrong-password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash("same-password").unwrap();
        let b = hash("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_stored_hash_is_a_mismatch() {
        assert!(!verify("anything", "not-a-phc-string"));
    }
}
