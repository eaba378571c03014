//! Request authentication strategies
//!
//! Resolves an inbound request to an authenticated identity without knowing
//! anything about the HTTP framework in use. The (out-of-scope) routing layer
//! adapts its request type into a `RequestInfo`, asks `require_auth` whether
//! the path needs authentication at all, and calls `current_user` on the
//! configured strategy:
//!
//! * [`NullAuth`] - never resolves an identity; for deployments with auth off.
//! * [`BasicAuth`] - RFC 7617 `Authorization: Basic` credentials checked
//!   against the user store.
//! * [`SessionAuth`] - a session cookie resolved through [`Auth`].
//!
//! Credential extraction never fails outward: any parse problem collapses to
//! "no identity", which the caller turns into its 401/403 equivalent. Only
//! store malfunctions produce an `Err`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::auth::Auth;
use crate::store::{UserRecord, UserStore};

pub mod basic;
pub mod session;

pub use basic::BasicAuth;
pub use session::{DEFAULT_SESSION_COOKIE, SessionAuth};

/// Framework-agnostic view of an inbound request.
///
/// Carries only what the strategies need: headers (looked up ASCII
/// case-insensitively) and named cookie values.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl RequestInfo {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header (builder style).
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Add a cookie (builder style).
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Look up a header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Look up a cookie by exact name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Decide whether a path requires authentication.
///
/// Returns `false` (no auth required) when the path matches any entry in
/// `excluded_paths`; `true` otherwise, including for an empty exclusion list.
///
/// Matching is slash-tolerant: a missing trailing `/` is appended to both
/// sides before comparison. An excluded entry ending in `*` excludes every
/// path sharing its prefix.
pub fn require_auth(path: &str, excluded_paths: &[String]) -> bool {
    let path = normalize_path(path);

    for excluded in excluded_paths {
        if let Some(prefix) = excluded.strip_suffix('*') {
            if path.starts_with(prefix) {
                return false;
            }
        } else if path == normalize_path(excluded) {
            return false;
        }
    }

    true
}

fn normalize_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// A strategy resolving inbound requests to authenticated identities.
///
/// Strategies are chosen by configuration (see [`AuthConfig`]), not subclassing;
/// each is an independent type implementing this trait.
pub trait RequestAuthenticator: Send + Sync {
    /// Resolve the request to its authenticated user, if any.
    ///
    /// `Ok(None)` covers every failure a client can cause: missing or
    /// malformed credentials, unknown principals, wrong passwords. An `Err`
    /// means the store itself malfunctioned.
    fn current_user(&self, request: &RequestInfo) -> Result<Option<UserRecord>>;

    /// The raw `Authorization` header, if present.
    fn authorization_header<'a>(&self, request: &'a RequestInfo) -> Option<&'a str> {
        request.header("authorization")
    }

    /// Whether the given path requires authentication under this policy.
    fn require_auth(&self, path: &str, excluded_paths: &[String]) -> bool {
        require_auth(path, excluded_paths)
    }
}

/// The no-op strategy: every request is anonymous.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuth;

impl RequestAuthenticator for NullAuth {
    fn current_user(&self, _request: &RequestInfo) -> Result<Option<UserRecord>> {
        Ok(None)
    }
}

/// Which request-authentication strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// No request authentication
    #[default]
    None,
    /// `Authorization: Basic` credentials
    Basic,
    /// Session cookie
    Session,
}

/// Configuration for request authentication.
///
/// Deserializable from whatever config source the embedding application uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The strategy to run
    #[serde(default)]
    pub mode: AuthMode,

    /// Cookie carrying the session token (session mode only)
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Paths that never require authentication
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            session_cookie: default_session_cookie(),
            excluded_paths: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Build the configured strategy over the given store.
    pub fn authenticator(&self, store: Arc<dyn UserStore>) -> Box<dyn RequestAuthenticator> {
        match self.mode {
            AuthMode::None => Box::new(NullAuth),
            AuthMode::Basic => Box::new(BasicAuth::new(store)),
            AuthMode::Session => Box::new(SessionAuth::new(
                Auth::new(store),
                self.session_cookie.clone(),
            )),
        }
    }
}
