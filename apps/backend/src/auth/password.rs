use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Version};
use rand::RngCore;
use thiserror::Error;

use crate::state::security_config::SecurityConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Stored hash is not a parseable PHC string
    #[error("stored password hash is corrupt: {0}")]
    CorruptHash(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a plaintext password into an argon2id PHC string with a fresh
/// 16-byte salt. Cost parameters come from `security.password_params`.
pub fn hash_password(plaintext: &str, security: &SecurityConfig) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hashing(e.to_string()))?;

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        security.password_params.clone(),
    );

    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Check `plaintext` against a stored PHC hash.
///
/// A mismatch is `Ok(false)`. A hash that cannot be parsed, or that fails
/// verification for a reason other than a mismatch, is an error so callers
/// can tell bad data from a bad password.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| PasswordError::CorruptHash(e.to_string()))?;

    // Params are read from the PHC string itself.
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::CorruptHash(e.to_string())),
    }
}
