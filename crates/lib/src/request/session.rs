//! Session-cookie request authentication

use crate::Result;
use crate::auth::Auth;
use crate::store::UserRecord;

use super::{RequestAuthenticator, RequestInfo};

/// Cookie name used when the configuration does not override it.
pub const DEFAULT_SESSION_COOKIE: &str = "session_id";

/// Authenticates requests carrying a session token in a named cookie.
///
/// Delegates resolution to `Auth::user_from_session_id`; a missing cookie or
/// an unknown token both resolve to no identity.
pub struct SessionAuth {
    auth: Auth,
    cookie_name: String,
}

impl SessionAuth {
    /// Create a session-auth strategy reading the given cookie.
    pub fn new(auth: Auth, cookie_name: impl Into<String>) -> Self {
        Self {
            auth,
            cookie_name: cookie_name.into(),
        }
    }

    /// The cookie this strategy reads the session token from.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

impl RequestAuthenticator for SessionAuth {
    fn current_user(&self, request: &RequestInfo) -> Result<Option<UserRecord>> {
        let Some(session_id) = request.cookie(&self.cookie_name) else {
            return Ok(None);
        };
        self.auth.user_from_session_id(session_id)
    }
}
