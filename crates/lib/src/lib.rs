//!
//! Gatekey: a credential and session authentication core.
//! This library provides the building blocks for password-based user
//! authentication, independent of any HTTP framework or storage engine.
//!
//! ## Core Concepts
//!
//! * **Crypto (`crypto`)**: Salted one-way password hashing (Argon2id) and
//!   opaque token generation. Hashes embed their salt and verify in constant time.
//! * **User store (`store::UserStore`)**: A pluggable persistence layer for
//!   `UserRecord`s, queried by unique-field predicates. An in-memory
//!   implementation (`store::InMemoryStore`) is provided for development and testing.
//! * **Auth (`auth::Auth`)**: The credential/session state machine: registration,
//!   login verification, session issuance and teardown, and single-use
//!   password-reset tokens. `Auth` owns every lifecycle transition of sessions
//!   and reset tokens; the store is the sole mutator of persisted state.
//! * **Request authentication (`request`)**: Strategies that resolve an inbound
//!   request to an authenticated identity (`NullAuth`, `BasicAuth`,
//!   `SessionAuth`), plus a slash-tolerant path-exclusion policy deciding which
//!   paths require authentication at all.
//!
//! The HTTP routing layer, cookie extraction, and response formatting are
//! deliberately out of scope: callers adapt their framework's request type into
//! `request::RequestInfo` and map errors onto their own response shapes.

pub mod auth;
pub mod crypto;
pub mod request;
pub mod store;

pub use auth::Auth;
pub use store::{InMemoryStore, UserRecord, UserStore};

/// Result type used throughout the Gatekey library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Gatekey library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured authentication errors from the auth module
    #[error(transparent)]
    Auth(auth::AuthError),

    /// Structured cryptography errors from the crypto module
    #[error(transparent)]
    Crypto(crypto::CryptoError),

    /// Structured user-store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Auth(_) => "auth",
            Error::Crypto(_) => "crypto",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error indicates a resource was not found.
    ///
    /// Lookup misses are expected in most flows and converted to `None`/`false`
    /// before they reach callers; this helper exists for the places where they
    /// are allowed to surface (reset-token issuance and consumption).
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_not_found(),
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_conflict(),
            Error::Store(store_err) => store_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is validation-related (bad or missing input).
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Crypto(crypto_err) => crypto_err.is_validation_error(),
            Error::Store(store_err) => store_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a persistence-layer malfunction.
    ///
    /// Store failures are fatal and propagate unchanged through every auth
    /// operation; they are never converted to `None`/`false`.
    pub fn is_store_failure(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_store_failure(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}
