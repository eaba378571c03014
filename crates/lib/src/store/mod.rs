//! User-record storage for the authentication core
//!
//! This module provides the `UserStore` trait and the built-in `InMemoryStore`
//! implementation.
//!
//! The `UserStore` trait defines the interface for persisting and querying
//! `UserRecord`s. This keeps the auth state machine (`auth::Auth`) independent
//! of the specific storage mechanism.

use crate::Result;

pub mod errors;
pub mod in_memory;
pub mod types;

pub use errors::StoreError;
pub use in_memory::InMemoryStore;
pub use types::{UserField, UserRecord, UserUpdate};

/// Trait abstracting the underlying persistence of user records.
///
/// Implementations handle the specifics of how records are stored (in memory,
/// SQL, a remote service) and must uphold three contracts:
///
/// * **Email uniqueness is enforced at insert.** `add_user` and email
///   reassignment through `update_user` fail with `StoreError::EmailTaken`
///   on conflict, atomically with the write. Registration relies on this
///   instead of a separate existence check, so two racing registrations for
///   the same email cannot both succeed.
/// * **Each operation is a critical section** against the persisted record
///   set: implementations serialize or transactionally isolate per-record
///   mutation so concurrent requests racing on the same user cannot lose
///   updates.
/// * **Mutations are durable before the call returns.** There is no async
///   write-back; a returned `Ok` means the change is persisted.
///
/// All implementations must be `Send` and `Sync` to allow sharing across
/// request-handling threads.
pub trait UserStore: Send + Sync {
    /// Insert a new user record.
    ///
    /// Assigns a fresh unique id. Fails with `StoreError::MissingField` if
    /// `email` or `hashed_password` is empty, and `StoreError::EmailTaken`
    /// if the email is already registered.
    ///
    /// # Arguments
    /// * `email` - The unique login identifier
    /// * `hashed_password` - The pre-hashed credential (never a raw password)
    ///
    /// # Returns
    /// The newly created `UserRecord`.
    fn add_user(&self, email: &str, hashed_password: &str) -> Result<UserRecord>;

    /// Find the single record matching all given field predicates.
    ///
    /// The filterable fields (id, email, session_id, reset_token) are unique,
    /// so at most one logical match exists and no ordering guarantee is
    /// needed. Fails with `StoreError::NoMatch` on zero matches and
    /// `StoreError::EmptyQuery` when no predicates are given.
    ///
    /// # Arguments
    /// * `filters` - Conjunction of `(field, value)` predicates
    fn find_user_by(&self, filters: &[(UserField, &str)]) -> Result<UserRecord>;

    /// Apply a set of field assignments to an existing record.
    ///
    /// The update is all-or-nothing: it is validated in full before anything
    /// is applied, and a validation failure leaves the record untouched.
    /// Fails with `StoreError::UserNotFound` if `id` is absent.
    ///
    /// # Arguments
    /// * `id` - The record to update
    /// * `update` - The field assignments to apply
    fn update_user(&self, id: &str, update: UserUpdate) -> Result<()>;
}
