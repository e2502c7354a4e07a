//! The StockX API client.
//!
//! [`StockXClient`] owns the configuration, the shared session, the HTTP
//! layer and the background token refresher. Resource operations are defined
//! on it in the [`resources`](crate::resources) modules.

use std::sync::{Arc, PoisonError};

use tokio::sync::{broadcast, Mutex};

use crate::auth::oauth::{
    exchange_authorization_code, AuthError, RefreshContext, RefreshEvent, TokenRefresher,
};
use crate::auth::{Session, SessionStore};
use crate::clients::{build_reqwest_client, HttpClient, HttpError};
use crate::config::StockXConfig;

/// Number of refresh events buffered per subscriber.
const REFRESH_EVENT_CAPACITY: usize = 16;

/// Async client for the StockX public API.
///
/// # Lifecycle
///
/// 1. Build the client from a [`StockXConfig`] holding an authorization code.
/// 2. Call [`authenticate`](Self::authenticate). On success the session holds
///    an access token and a background task keeps it fresh.
/// 3. Call resource operations. Each request reads the current token.
/// 4. Drop the client; the background task stops.
///
/// A session persisted earlier can be restored with
/// [`with_session`](Self::with_session) followed by
/// [`start_auto_refresh`](Self::start_auto_refresh).
///
/// # Thread Safety
///
/// `StockXClient` is `Send + Sync`; share it behind an `Arc` to issue
/// requests from several tasks.
///
/// # Example
///
/// ```rust,ignore
/// use stockx_api::{ApiKey, AuthorizationCode, ClientId, ClientSecret, StockXClient, StockXConfig};
///
/// let config = StockXConfig::builder()
///     .client_id(ClientId::new("client-id")?)
///     .client_secret(ClientSecret::new("client-secret")?)
///     .api_key(ApiKey::new("api-key")?)
///     .authorization_code(AuthorizationCode::new("code-from-redirect")?)
///     .build()?;
///
/// let client = StockXClient::new(config)?;
/// client.authenticate().await?;
///
/// let order = client.get_order("12345678-12345678").await?;
/// ```
#[derive(Debug)]
pub struct StockXClient {
    config: Arc<StockXConfig>,
    http: HttpClient,
    session: SessionStore,
    refresh_gate: Arc<Mutex<()>>,
    events: broadcast::Sender<RefreshEvent>,
    refresher: std::sync::Mutex<Option<TokenRefresher>>,
}

// Verify StockXClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StockXClient>();
};

impl StockXClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: StockXConfig) -> Result<Self, HttpError> {
        Self::with_session(config, Session::default())
    }

    /// Creates a client holding a previously obtained session.
    ///
    /// No background refresh runs until
    /// [`start_auto_refresh`](Self::start_auto_refresh) is called.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn with_session(config: StockXConfig, session: Session) -> Result<Self, HttpError> {
        let client = build_reqwest_client(&config)?;
        let session = SessionStore::new(session);
        let http = HttpClient::with_client(client, &config, session.clone());
        let (events, _) = broadcast::channel(REFRESH_EVENT_CAPACITY);

        Ok(Self {
            config: Arc::new(config),
            http,
            session,
            refresh_gate: Arc::new(Mutex::new(())),
            events,
            refresher: std::sync::Mutex::new(None),
        })
    }

    /// Exchanges the configured authorization code for tokens.
    ///
    /// On success the session is replaced and the background refresher is
    /// (re)started; a previous refresher is stopped first. On failure the
    /// session is left untouched.
    ///
    /// # Errors
    ///
    /// See [`exchange_authorization_code`].
    #[tracing::instrument(skip_all)]
    pub async fn authenticate(&self) -> Result<(), AuthError> {
        let expires_in = {
            let _guard = self.refresh_gate.lock().await;
            let session = exchange_authorization_code(self.http.inner(), &self.config).await?;
            let expires_in = session.expires_in;
            self.session.replace(session);
            expires_in
        };

        tracing::info!(expires_in, "Authenticated with StockX");
        self.start_auto_refresh();
        Ok(())
    }

    /// Refreshes the access token now.
    ///
    /// On failure the current (possibly stale) token stays in place.
    ///
    /// # Errors
    ///
    /// See [`refresh_access_token`](crate::auth::oauth::refresh_access_token).
    #[tracing::instrument(skip_all)]
    pub async fn refresh_token(&self) -> Result<(), AuthError> {
        let expires_in = self.refresh_context().refresh().await?;
        tracing::info!(expires_in, "Refreshed StockX access token");
        Ok(())
    }

    /// Returns the current access token (empty before authentication).
    #[must_use]
    pub fn access_token(&self) -> String {
        self.session.access_token()
    }

    /// Returns a copy of the current session, e.g. to persist it.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.snapshot()
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &StockXConfig {
        &self.config
    }

    /// Returns the HTTP layer used for resource requests.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Starts the background refresher, replacing any running one.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn start_auto_refresh(&self) {
        let refresher = TokenRefresher::spawn(self.refresh_context(), self.events.clone());
        let previous = self.lock_refresher().replace(refresher);
        if let Some(previous) = previous {
            tracing::debug!("Replacing running token refresher");
            previous.stop();
        }
    }

    /// Stops the background refresher, if running.
    pub fn stop_auto_refresh(&self) {
        if let Some(refresher) = self.lock_refresher().take() {
            refresher.stop();
        }
    }

    /// Returns `true` while a background refresher is running.
    #[must_use]
    pub fn is_auto_refreshing(&self) -> bool {
        self.lock_refresher()
            .as_ref()
            .is_some_and(|refresher| !refresher.is_finished())
    }

    /// Subscribes to events published by the background refresher.
    #[must_use]
    pub fn subscribe_refresh_events(&self) -> broadcast::Receiver<RefreshEvent> {
        self.events.subscribe()
    }

    fn refresh_context(&self) -> RefreshContext {
        RefreshContext {
            http: self.http.inner().clone(),
            config: Arc::clone(&self.config),
            session: self.session.clone(),
            gate: Arc::clone(&self.refresh_gate),
        }
    }

    fn lock_refresher(&self) -> std::sync::MutexGuard<'_, Option<TokenRefresher>> {
        self.refresher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for StockXClient {
    fn drop(&mut self) {
        self.stop_auto_refresh();
    }
}
