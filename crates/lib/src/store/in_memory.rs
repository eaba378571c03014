//! In-memory user store

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::Result;
use crate::crypto;

use super::UserStore;
use super::errors::StoreError;
use super::types::{UserField, UserRecord, UserUpdate};

/// A simple in-memory store implementation using a `HashMap` keyed by user id.
///
/// Suitable for testing, development, or scenarios where data persistence is
/// not strictly required or is handled externally (e.g., by saving/loading the
/// entire state to/from a file via `save_to_file`/`load_from_file`).
///
/// A single `RwLock` guards the whole record map, so every operation is a
/// critical section against the record set and updates that span the email
/// uniqueness check and the write are atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.read().unwrap().is_empty()
    }

    /// Save the current record set to a JSON snapshot file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let users = self.users.read().unwrap();
        let json = serde_json::to_string_pretty(&*users)
            .map_err(|e| StoreError::Serialize { source: e })?;
        fs::write(path, json).map_err(|e| StoreError::Io { source: e })?;
        Ok(())
    }

    /// Load a record set from a JSON snapshot file.
    ///
    /// A missing file yields an empty store.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path).map_err(|e| StoreError::Io { source: e })?;
        let users: HashMap<String, UserRecord> =
            serde_json::from_str(&json).map_err(|e| StoreError::Serialize { source: e })?;

        Ok(Self {
            users: RwLock::new(users),
        })
    }

    fn email_taken(
        users: &HashMap<String, UserRecord>,
        email: &str,
        exclude_id: Option<&str>,
    ) -> bool {
        users
            .values()
            .any(|u| u.email == email && Some(u.id.as_str()) != exclude_id)
    }

    fn render_query(filters: &[(UserField, &str)]) -> String {
        filters
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl UserStore for InMemoryStore {
    fn add_user(&self, email: &str, hashed_password: &str) -> Result<UserRecord> {
        if email.is_empty() {
            return Err(StoreError::MissingField {
                field: UserField::Email,
            }
            .into());
        }
        if hashed_password.is_empty() {
            return Err(StoreError::MissingField {
                field: UserField::HashedPassword,
            }
            .into());
        }

        let mut users = self.users.write().unwrap();

        // Uniqueness is enforced here, under the same lock as the insert, so
        // racing registrations for one email cannot both succeed.
        if Self::email_taken(&users, email, None) {
            return Err(StoreError::EmailTaken {
                email: email.to_string(),
            }
            .into());
        }

        let record = UserRecord {
            id: crypto::generate_token(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            session_id: None,
            reset_token: None,
        };
        users.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    fn find_user_by(&self, filters: &[(UserField, &str)]) -> Result<UserRecord> {
        if filters.is_empty() {
            return Err(StoreError::EmptyQuery.into());
        }

        let users = self.users.read().unwrap();
        users
            .values()
            .find(|user| {
                filters
                    .iter()
                    .all(|(field, value)| user.field(*field) == Some(*value))
            })
            .cloned()
            .ok_or_else(|| {
                StoreError::NoMatch {
                    query: Self::render_query(filters),
                }
                .into()
            })
    }

    fn update_user(&self, id: &str, update: UserUpdate) -> Result<()> {
        // Validate the whole update before touching the record (all-or-nothing).
        update.validate()?;

        let mut users = self.users.write().unwrap();

        if !users.contains_key(id) {
            return Err(StoreError::UserNotFound { id: id.to_string() }.into());
        }

        if let Some(new_email) = update.new_email() {
            if Self::email_taken(&users, new_email, Some(id)) {
                return Err(StoreError::EmailTaken {
                    email: new_email.to_string(),
                }
                .into());
            }
        }

        let user = users.get_mut(id).ok_or_else(|| StoreError::UserNotFound {
            id: id.to_string(),
        })?;

        for (field, value) in update.changes() {
            match field {
                UserField::Email => {
                    if let Some(v) = value {
                        user.email = v.clone();
                    }
                }
                UserField::HashedPassword => {
                    if let Some(v) = value {
                        user.hashed_password = v.clone();
                    }
                }
                UserField::SessionId => user.session_id = value.clone(),
                UserField::ResetToken => user.reset_token = value.clone(),
                // Rejected by validate() above.
                UserField::Id => unreachable!("id assignments fail validation"),
            }
        }

        Ok(())
    }
}
