//! The credential and session state machine
//!
//! `Auth` drives every lifecycle transition a user record goes through:
//! `Unregistered -> Registered{no session} -> Registered{active session}`,
//! plus the independent pending/none state of the password-reset token.
//!
//! `Auth` holds an injected `UserStore` and no other state, so a single
//! instance can be shared (cheaply cloned) across request handlers. It never
//! persists anything itself; the store is the sole mutator of records.
//!
//! Lookup misses are expected in most flows and are converted to `None` or
//! `false` here rather than leaked to callers. The two reset-token operations
//! are the exception: an unknown email or token surfaces as an `AuthError`
//! for the caller to map onto a forbidden-style response. Unknown-email login
//! attempts are indistinguishable from wrong-password attempts.

use std::sync::Arc;

use tracing::debug;

use crate::Result;
use crate::crypto;
use crate::store::{UserField, UserRecord, UserStore, UserUpdate};

pub mod errors;

pub use errors::AuthError;

/// The authentication service.
///
/// Sessions have one-active-per-user semantics: the session token lives on the
/// user record, and issuing a new session replaces any previous one. Neither
/// session ids nor reset tokens expire; callers wanting TTL enforcement must
/// layer it on top.
#[derive(Clone)]
pub struct Auth {
    store: Arc<dyn UserStore>,
}

impl Auth {
    /// Create an auth service backed by the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Access the underlying user store.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Register a new user.
    ///
    /// Hashes the password and inserts the record. Uniqueness is enforced by
    /// the store's insert, not by a separate existence check, so two racing
    /// registrations for one email cannot both succeed; the loser gets
    /// `AuthError::UserExists`.
    ///
    /// # Arguments
    /// * `email` - The unique login identifier
    /// * `password` - The plaintext credential (must be non-empty)
    ///
    /// # Returns
    /// The newly created `UserRecord`.
    pub fn register_user(&self, email: &str, password: &str) -> Result<UserRecord> {
        let hashed = crypto::hash_password(password)?;

        match self.store.add_user(email, &hashed) {
            Ok(user) => {
                debug!(user_id = %user.id, "registered new user");
                Ok(user)
            }
            Err(e) if e.is_conflict() => Err(AuthError::UserExists {
                email: email.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    /// Check whether an email/password pair is a valid login.
    ///
    /// `Ok(false)` for an unknown email or a failed verification; the two
    /// cases are indistinguishable to the caller. Only store malfunctions
    /// produce an `Err`.
    pub fn valid_login(&self, email: &str, password: &str) -> Result<bool> {
        let user = match self.store.find_user_by(&[(UserField::Email, email)]) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Ok(false),
            Err(e) => return Err(e),
        };

        Ok(crypto::verify_password(&user.hashed_password, password))
    }

    /// Issue a fresh session token for the given email.
    ///
    /// Returns `Ok(None)` if the user is unknown. Does **not** verify the
    /// password: callers must check `valid_login` first. Credential check and
    /// session issuance are deliberately decoupled operations.
    pub fn create_session(&self, email: &str) -> Result<Option<String>> {
        let user = match self.store.find_user_by(&[(UserField::Email, email)]) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let session_id = crypto::generate_token();
        self.store.update_user(
            &user.id,
            UserUpdate::new().set(UserField::SessionId, session_id.clone()),
        )?;
        debug!(user_id = %user.id, "session created");

        Ok(Some(session_id))
    }

    /// Resolve a session token to its user record.
    ///
    /// `Ok(None)` on empty input or lookup miss. No expiry check: a session
    /// stays valid until destroyed.
    pub fn user_from_session_id(&self, session_id: &str) -> Result<Option<UserRecord>> {
        if session_id.is_empty() {
            return Ok(None);
        }

        match self
            .store
            .find_user_by(&[(UserField::SessionId, session_id)])
        {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Destroy a user's active session.
    ///
    /// Idempotent: clearing an already-absent session succeeds, and an unknown
    /// user id is a silent no-op.
    pub fn destroy_session(&self, user_id: &str) -> Result<()> {
        match self
            .store
            .update_user(user_id, UserUpdate::new().clear(UserField::SessionId))
        {
            Ok(()) => {
                debug!(user_id = %user_id, "session destroyed");
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Issue a single-use password-reset token for the given email.
    ///
    /// This is one of the two places a lookup miss surfaces to the caller:
    /// an unregistered email fails with `AuthError::UnknownEmail`.
    pub fn reset_password_token(&self, email: &str) -> Result<String> {
        let user = match self.store.find_user_by(&[(UserField::Email, email)]) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                return Err(AuthError::UnknownEmail {
                    email: email.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        let reset_token = crypto::generate_token();
        self.store.update_user(
            &user.id,
            UserUpdate::new().set(UserField::ResetToken, reset_token.clone()),
        )?;
        debug!(user_id = %user.id, "reset token issued");

        Ok(reset_token)
    }

    /// Consume a reset token and set a new password.
    ///
    /// The new hash is stored and the token cleared in one atomic update, so
    /// the token is single-use: a second call with the same token fails with
    /// `AuthError::InvalidResetToken`.
    pub fn update_password(&self, reset_token: &str, new_password: &str) -> Result<()> {
        if reset_token.is_empty() {
            return Err(AuthError::InvalidResetToken.into());
        }

        let user = match self
            .store
            .find_user_by(&[(UserField::ResetToken, reset_token)])
        {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Err(AuthError::InvalidResetToken.into()),
            Err(e) => return Err(e),
        };

        let hashed = crypto::hash_password(new_password)?;
        self.store.update_user(
            &user.id,
            UserUpdate::new()
                .set(UserField::HashedPassword, hashed)
                .clear(UserField::ResetToken),
        )?;
        debug!(user_id = %user.id, "password updated");

        Ok(())
    }
}
