//! Error types for user-record storage.
//!
//! This module defines structured error types for store operations,
//! providing better error context and type safety compared to string-based errors.

use thiserror::Error;

use super::types::UserField;

/// Errors that can occur during user-store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matched a field-predicate lookup.
    #[error("No user matches query: {query}")]
    NoMatch {
        /// Human-readable rendering of the predicates that failed to match
        query: String,
    },

    /// No record with the given id.
    #[error("User not found: {id}")]
    UserNotFound {
        /// The id that was not found
        id: String,
    },

    /// Insert or update would violate email uniqueness.
    #[error("Email already registered: {email}")]
    EmailTaken {
        /// The conflicting email address
        email: String,
    },

    /// A required field was empty or absent.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The field that was empty
        field: UserField,
    },

    /// A field name does not correspond to any user-record attribute.
    #[error("Unknown user field: {name}")]
    UnknownField {
        /// The unrecognized field name
        name: String,
    },

    /// Attempted to reassign an immutable field.
    #[error("Field cannot be updated: {field}")]
    ImmutableField {
        /// The immutable field
        field: UserField,
    },

    /// Attempted to clear a field that must always hold a value.
    #[error("Field cannot be cleared: {field}")]
    NotNullable {
        /// The non-nullable field
        field: UserField,
    },

    /// Lookup invoked without any predicates.
    #[error("No predicates provided for user lookup")]
    EmptyQuery,

    /// The persistence layer itself malfunctioned.
    #[error("Store backend failure: {reason}")]
    Backend {
        /// Description of the malfunction
        reason: String,
    },

    /// Snapshot serialization failed.
    #[error("Snapshot serialization failed")]
    Serialize {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot file I/O failed.
    #[error("Snapshot I/O error")]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Check if this error indicates a record was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NoMatch { .. } | StoreError::UserNotFound { .. }
        )
    }

    /// Check if this error indicates a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::EmailTaken { .. })
    }

    /// Check if this error is validation-related (bad or missing input).
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            StoreError::MissingField { .. }
                | StoreError::UnknownField { .. }
                | StoreError::ImmutableField { .. }
                | StoreError::NotNullable { .. }
                | StoreError::EmptyQuery
        )
    }

    /// Check if this error indicates a persistence-layer malfunction.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Backend { .. } | StoreError::Serialize { .. } | StoreError::Io { .. }
        )
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
