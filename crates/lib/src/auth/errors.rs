//! Error types for the authentication state machine.

use thiserror::Error;

/// Errors that can occur during auth operations.
///
/// Lookup misses inside the store are handled locally by `Auth` (converted to
/// `None`/`false`) everywhere except the reset-token flows, which surface them
/// through the variants below. Store malfunctions propagate unchanged as
/// `crate::Error::Store`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration attempted for an email that already has a record.
    #[error("User already exists: {email}")]
    UserExists {
        /// The conflicting email address
        email: String,
    },

    /// Reset-token issuance requested for an unregistered email.
    #[error("No user registered for email: {email}")]
    UnknownEmail {
        /// The unknown email address
        email: String,
    },

    /// Password update attempted with a token that is unknown or already used.
    #[error("Invalid or already-used reset token")]
    InvalidResetToken,
}

impl AuthError {
    /// Check if this error indicates a principal was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AuthError::UnknownEmail { .. } | AuthError::InvalidResetToken
        )
    }

    /// Check if this error indicates a registration conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AuthError::UserExists { .. })
    }
}

// Conversion from AuthError to the main Error type
impl From<AuthError> for crate::Error {
    fn from(err: AuthError) -> Self {
        crate::Error::Auth(err)
    }
}
