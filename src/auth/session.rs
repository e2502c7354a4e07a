//! Session management for StockX API authentication.
//!
//! This module provides the [`Session`] value holding the current OAuth
//! tokens and the [`SessionStore`] that shares it between API calls and the
//! background refresher.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The OAuth token state of a StockX client.
///
/// A session starts empty and is filled by the authorization-code exchange.
/// Each refresh replaces the access token and expiry; the refresh token is
/// replaced only when the server rotates it.
///
/// Sessions are serializable so callers can persist them and restore a client
/// later with [`StockXClient::with_session`](crate::StockXClient::with_session).
///
/// # Example
///
/// ```rust
/// use stockx_api::Session;
///
/// let session = Session::new("access", "refresh", 43_200);
/// assert!(session.is_authenticated());
/// assert!(!session.expired());
///
/// // Token values never appear in debug output
/// assert!(!format!("{:?}", session).contains("access"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every API request.
    pub access_token: String,

    /// Token used to obtain a new access token.
    pub refresh_token: String,

    /// Lifetime of the access token in seconds, as reported by the server.
    pub expires_in: u64,

    /// When the access token was issued, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obtained_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session from known tokens, e.g. ones persisted earlier.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_in,
            obtained_at: None,
        }
    }

    /// Returns `true` if the session holds an access token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Returns `true` if the session holds a refresh token.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Returns when the access token expires, if the issue time is known.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = Duration::seconds(i64::try_from(self.expires_in).unwrap_or(i64::MAX));
        self.obtained_at
            .and_then(|obtained| obtained.checked_add_signed(lifetime))
    }

    /// Returns `true` if the access token is known to have expired.
    ///
    /// Sessions without an issue time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at().is_some_and(|expires| Utc::now() > expires)
    }

    /// Builds a session from an authorization-code grant response.
    pub(crate) fn from_authorization_response(response: AuthorizationTokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            obtained_at: Some(Utc::now()),
        }
    }

    /// Returns a copy of this session updated with a refresh grant response.
    ///
    /// The refresh token is kept unless the response carries a new one.
    pub(crate) fn refreshed(&self, response: RefreshTokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .filter(|token| !token.is_empty())
                .unwrap_or_else(|| self.refresh_token.clone()),
            expires_in: response.expires_in,
            obtained_at: Some(Utc::now()),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .field("expires_in", &self.expires_in)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

const fn mask(token: &str) -> &'static str {
    if token.is_empty() {
        "<empty>"
    } else {
        "*****"
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

/// Response body of the authorization-code grant.
///
/// `id_token`, `scope` and `token_type` are also returned but unused.
#[derive(Clone, Deserialize)]
pub(crate) struct AuthorizationTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

/// Response body of the refresh-token grant.
#[derive(Clone, Deserialize)]
pub(crate) struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Shared, lock-protected holder of the current [`Session`].
///
/// Cloning a `SessionStore` yields another handle to the same session. Readers
/// always observe a complete session: updates swap the whole value under the
/// write lock, and no lock is held across an `.await`.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Creates a store holding `session`.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> String {
        self.read().access_token.clone()
    }

    /// Returns the current access token lifetime in seconds.
    #[must_use]
    pub fn expires_in(&self) -> u64 {
        self.read().expires_in
    }

    /// Replaces the stored session.
    pub(crate) fn replace(&self, session: Session) {
        *self.write() = session;
    }

    // A panic while holding the lock cannot leave a half-written session,
    // so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionStore").field(&*self.read()).finish()
    }
}
