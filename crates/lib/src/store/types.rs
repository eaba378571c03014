//! Core data types for user-record storage

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::StoreError;

/// A persisted user record.
///
/// The id is immutable once assigned; every other field changes through
/// `UserStore::update_user`. Email is unique across all records. Session ids
/// and reset tokens are opaque capability strings set and cleared by the auth
/// layer.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique, immutable identifier (UUID)
    pub id: String,

    /// Login identifier, unique across all records
    pub email: String,

    /// Salted password hash (PHC string format), opaque to callers
    pub hashed_password: String,

    /// Active session token, if any
    pub session_id: Option<String>,

    /// Pending password-reset token, if any
    pub reset_token: Option<String>,
}

impl UserRecord {
    /// Read a field as a string slice for predicate matching.
    ///
    /// Optional fields yield `None` when unset, so a predicate on them only
    /// matches records that currently hold a value.
    pub(crate) fn field(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Id => Some(&self.id),
            UserField::Email => Some(&self.email),
            UserField::HashedPassword => Some(&self.hashed_password),
            UserField::SessionId => self.session_id.as_deref(),
            UserField::ResetToken => self.reset_token.as_deref(),
        }
    }
}

// Manual Debug so password hashes and live tokens never end up in logs.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("hashed_password", &"<redacted>")
            .field("session_id", &self.session_id.as_ref().map(|_| "<redacted>"))
            .field("reset_token", &self.reset_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A user-record attribute addressable by name.
///
/// This is the validation boundary for callers passing field names as strings
/// (e.g. a form layer): parsing an unrecognized name fails with
/// `StoreError::UnknownField` before any store operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Id,
    Email,
    HashedPassword,
    SessionId,
    ResetToken,
}

impl UserField {
    /// The snake_case attribute name.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Email => "email",
            UserField::HashedPassword => "hashed_password",
            UserField::SessionId => "session_id",
            UserField::ResetToken => "reset_token",
        }
    }

    /// Whether the field may be cleared to hold no value.
    pub fn is_nullable(&self) -> bool {
        matches!(self, UserField::SessionId | UserField::ResetToken)
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserField {
    type Err = StoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "id" => Ok(UserField::Id),
            "email" => Ok(UserField::Email),
            "hashed_password" => Ok(UserField::HashedPassword),
            "session_id" => Ok(UserField::SessionId),
            "reset_token" => Ok(UserField::ResetToken),
            _ => Err(StoreError::UnknownField {
                name: name.to_string(),
            }),
        }
    }
}

/// A set of field assignments applied atomically by `UserStore::update_user`.
///
/// Built with the `set`/`clear` combinators. The whole update is validated
/// before anything is applied: an invalid change rejects the update and leaves
/// the record untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    changes: Vec<(UserField, Option<String>)>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to a field.
    pub fn set(mut self, field: UserField, value: impl Into<String>) -> Self {
        self.changes.push((field, Some(value.into())));
        self
    }

    /// Clear a nullable field.
    pub fn clear(mut self, field: UserField) -> Self {
        self.changes.push((field, None));
        self
    }

    /// Whether the update contains no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The ordered field assignments in this update.
    pub fn changes(&self) -> &[(UserField, Option<String>)] {
        &self.changes
    }

    /// The new email, if this update reassigns it.
    ///
    /// Store implementations use this to re-check email uniqueness before
    /// applying the update.
    pub fn new_email(&self) -> Option<&str> {
        self.changes.iter().rev().find_map(|(field, value)| {
            (*field == UserField::Email).then_some(value.as_deref()).flatten()
        })
    }

    /// Validate every change against field mutability rules.
    ///
    /// Fails with `ImmutableField` for id assignments and `NotNullable` for
    /// clears of fields that must always hold a value. Store implementations
    /// call this before touching the record (all-or-nothing semantics).
    pub fn validate(&self) -> Result<(), StoreError> {
        for (field, value) in &self.changes {
            if *field == UserField::Id {
                return Err(StoreError::ImmutableField { field: *field });
            }
            match value {
                Some(v) if v.is_empty() => {
                    return Err(StoreError::MissingField { field: *field });
                }
                None if !field.is_nullable() => {
                    return Err(StoreError::NotNullable { field: *field });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
