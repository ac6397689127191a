//! Password hashing and verification.
//!
//! New hashes are bcrypt. Verification dispatches on the stored hash: PHC
//! strings starting with `$argon2` are checked with Argon2, everything else
//! with bcrypt.

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;

/// Work factor for hashes produced by the `hash-password` tool.
pub const BCRYPT_COST: u32 = 12;

/// Error type for password hashing failures.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// The stored argon2 hash could not be parsed.
    #[error("argon2 error: {0}")]
    Argon2(String),
}

/// Hash a plaintext password with bcrypt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a plaintext password against a stored bcrypt or argon2 hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not,
/// and `Err` when the stored hash is unreadable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    if hash.starts_with("$argon2") {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::Argon2(e.to_string()))?;
        return match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::Argon2(e.to_string())),
        };
    }
    Ok(bcrypt::verify(password, hash)?)
}
