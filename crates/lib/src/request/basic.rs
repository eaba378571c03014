//! Basic-credential request authentication

use std::sync::Arc;

use base64ct::{Base64, Encoding};
use tracing::debug;

use crate::Result;
use crate::crypto;
use crate::store::{UserField, UserRecord, UserStore};

use super::{RequestAuthenticator, RequestInfo};

/// Authenticates requests carrying `Authorization: Basic` credentials.
///
/// The header payload is base64-decoded and split on the first `:` into
/// email and password; the password is checked through the same
/// `crypto::verify_password` path the auth service uses, against the
/// store's per-user hash.
pub struct BasicAuth {
    store: Arc<dyn UserStore>,
}

impl BasicAuth {
    /// Create a basic-auth strategy over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Extract `(email, password)` from an `Authorization` header value.
    ///
    /// `None` for a missing `Basic ` scheme, malformed base64, non-UTF-8
    /// decoded bytes, or a payload without a `:`. The split is on the first
    /// `:`, so passwords may themselves contain colons.
    fn decode_credentials(header: &str) -> Option<(String, String)> {
        let payload = header.strip_prefix("Basic ")?;
        let bytes = Base64::decode_vec(payload).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (email, password) = text.split_once(':')?;
        Some((email.to_string(), password.to_string()))
    }
}

impl RequestAuthenticator for BasicAuth {
    fn current_user(&self, request: &RequestInfo) -> Result<Option<UserRecord>> {
        let Some(header) = self.authorization_header(request) else {
            return Ok(None);
        };
        let Some((email, password)) = Self::decode_credentials(header) else {
            debug!("malformed Basic authorization header");
            return Ok(None);
        };

        let user = match self.store.find_user_by(&[(UserField::Email, &email)]) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        if crypto::verify_password(&user.hashed_password, &password) {
            Ok(Some(user))
        } else {
            debug!(user_id = %user.id, "rejected Basic credentials");
            Ok(None)
        }
    }
}
