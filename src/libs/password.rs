//! Argon2id password hashing for stored users.

use anyhow::Result;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

/// Hashes `password` into a PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Returns `Ok(false)` on a wrong password and an error only when `hash` is
/// not a valid PHC string.
pub fn verify(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("stored password hash is malformed: {}", e))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash("longenough1").unwrap();
        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("longenough1", &hashed).unwrap());
        assert!(!verify("longenough2", &hashed).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash("longenough1").unwrap(), hash("longenough1").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify("longenough1", "plaintext").is_err());
    }
}
