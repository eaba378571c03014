//! Cryptographic primitives for the authentication core
//!
//! Provides salted one-way password hashing using Argon2id and generation of
//! opaque tokens for user ids, sessions, and password resets.
//!
//! Hashes are produced in PHC string format, so the salt travels inside the
//! hash and no separate salt column is needed. Verification goes through
//! `argon2`'s `PasswordVerifier`, which compares digests in constant time.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during password hashing.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Empty password supplied where a real credential is required.
    #[error("Password must not be empty")]
    EmptyPassword,

    /// The hashing backend rejected the input.
    #[error("Password hashing failed: {reason}")]
    HashFailed { reason: String },
}

impl CryptoError {
    /// Check if this error is validation-related (bad or missing input).
    pub fn is_validation_error(&self) -> bool {
        matches!(self, CryptoError::EmptyPassword)
    }
}

impl From<CryptoError> for crate::Error {
    fn from(err: CryptoError) -> Self {
        crate::Error::Crypto(err)
    }
}

/// Hash a password using Argon2id with a fresh random salt
///
/// Output is non-deterministic: hashing the same password twice yields
/// different strings, but both verify against the original password.
///
/// # Arguments
/// * `password` - The password to hash
///
/// # Returns
/// The Argon2 hash in PHC string format, or `CryptoError::EmptyPassword`
/// if the password is empty.
pub fn hash_password(password: impl AsRef<str>) -> crate::Result<String> {
    let password = password.as_ref();
    if password.is_empty() {
        return Err(CryptoError::EmptyPassword.into());
    }

    let salt = SaltString::generate(&mut rand_core::OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CryptoError::HashFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
///
/// Returns `true` iff the password hashes to an equivalent value under the
/// salt embedded in `password_hash`. Never fails: empty inputs and malformed
/// hashes all evaluate to `false`, so callers cannot distinguish a missing
/// credential from a wrong one.
pub fn verify_password(password_hash: impl AsRef<str>, password: impl AsRef<str>) -> bool {
    let password = password.as_ref();
    let password_hash = password_hash.as_ref();
    if password.is_empty() || password_hash.is_empty() {
        return false;
    }

    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a fresh opaque token (UUID v4)
///
/// Used for user ids, session ids, and reset tokens. Tokens are unguessable
/// capability strings and are never parsed for meaning.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}
