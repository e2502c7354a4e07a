//! Configuration types for the StockX API SDK.
//!
//! This module provides the configuration used to authenticate against the
//! StockX OAuth server and to call the StockX public API.
//!
//! # Overview
//!
//! - [`StockXConfig`]: The main configuration struct holding all SDK settings
//! - [`StockXConfigBuilder`]: A builder for constructing [`StockXConfig`] instances
//! - [`ClientId`], [`ClientSecret`], [`ApiKey`], [`AuthorizationCode`]: validated credentials
//! - [`BaseUrl`]: A validated endpoint URL
//!
//! # Example
//!
//! ```rust
//! use stockx_api::{ApiKey, AuthorizationCode, ClientId, ClientSecret, StockXConfig};
//!
//! let config = StockXConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .authorization_code(AuthorizationCode::new("code-from-redirect").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.audience(), "gateway.stockx.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, AuthorizationCode, BaseUrl, ClientId, ClientSecret};

use crate::error::ConfigError;
use std::time::Duration;

/// The StockX OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.stockx.com/oauth/token";

/// The StockX public API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stockx.com/v2";

/// The redirect URI registered for the application.
pub const DEFAULT_REDIRECT_URI: &str = "https://localhost:3000";

/// The audience requested for issued tokens.
pub const DEFAULT_AUDIENCE: &str = "gateway.stockx.com";

/// How long before expiry the background refresher renews the token.
///
/// Short-lived tokens are still floored at one second.
pub const DEFAULT_REFRESH_LEEWAY: Duration = Duration::from_secs(30);

/// Delay before the first retry of a failed background refresh.
pub const DEFAULT_REFRESH_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound for the background refresh backoff.
pub const DEFAULT_REFRESH_RETRY_MAX_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Configuration for the StockX API SDK.
///
/// Holds the OAuth credentials, endpoint URLs and the timing parameters of
/// the background token refresher.
///
/// # Thread Safety
///
/// `StockXConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct StockXConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    api_key: ApiKey,
    authorization_code: Option<AuthorizationCode>,
    token_url: BaseUrl,
    api_base_url: BaseUrl,
    redirect_uri: String,
    audience: String,
    user_agent_prefix: Option<String>,
    request_timeout: Option<Duration>,
    refresh_leeway: Duration,
    refresh_retry_interval: Duration,
    refresh_retry_max_interval: Duration,
}

impl StockXConfig {
    /// Creates a new builder for constructing a `StockXConfig`.
    #[must_use]
    pub fn builder() -> StockXConfigBuilder {
        StockXConfigBuilder::new()
    }

    /// Returns the OAuth client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the API key sent as `x-api-key`.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the one-time authorization code, if configured.
    #[must_use]
    pub const fn authorization_code(&self) -> Option<&AuthorizationCode> {
        self.authorization_code.as_ref()
    }

    /// Returns the OAuth token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &BaseUrl {
        &self.token_url
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base_url(&self) -> &BaseUrl {
        &self.api_base_url
    }

    /// Returns the redirect URI sent with the authorization-code grant.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the token audience.
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns how long before expiry the background refresh fires.
    #[must_use]
    pub const fn refresh_leeway(&self) -> Duration {
        self.refresh_leeway
    }

    /// Returns the initial backoff after a failed background refresh.
    #[must_use]
    pub const fn refresh_retry_interval(&self) -> Duration {
        self.refresh_retry_interval
    }

    /// Returns the maximum backoff after repeated refresh failures.
    #[must_use]
    pub const fn refresh_retry_max_interval(&self) -> Duration {
        self.refresh_retry_max_interval
    }
}

// Verify StockXConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StockXConfig>();
};

/// Builder for constructing [`StockXConfig`] instances.
///
/// Required fields are `client_id`, `client_secret` and `api_key`. The
/// authorization code is only needed for [`StockXClient::authenticate`];
/// a client restored from a saved session can omit it.
///
/// # Defaults
///
/// - `token_url`: [`DEFAULT_TOKEN_URL`]
/// - `api_base_url`: [`DEFAULT_API_BASE_URL`]
/// - `redirect_uri`: [`DEFAULT_REDIRECT_URI`]
/// - `audience`: [`DEFAULT_AUDIENCE`]
/// - `request_timeout`: `None`
/// - `refresh_leeway`: [`DEFAULT_REFRESH_LEEWAY`] (30 seconds)
/// - `refresh_retry_interval`: 30 seconds
/// - `refresh_retry_max_interval`: 15 minutes
///
/// [`StockXClient::authenticate`]: crate::StockXClient::authenticate
#[derive(Debug, Default)]
pub struct StockXConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    api_key: Option<ApiKey>,
    authorization_code: Option<AuthorizationCode>,
    token_url: Option<BaseUrl>,
    api_base_url: Option<BaseUrl>,
    redirect_uri: Option<String>,
    audience: Option<String>,
    user_agent_prefix: Option<String>,
    request_timeout: Option<Duration>,
    refresh_leeway: Option<Duration>,
    refresh_retry_interval: Option<Duration>,
    refresh_retry_max_interval: Option<Duration>,
}

impl StockXConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the OAuth client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the one-time authorization code.
    #[must_use]
    pub fn authorization_code(mut self, code: AuthorizationCode) -> Self {
        self.authorization_code = Some(code);
        self
    }

    /// Overrides the OAuth token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: BaseUrl) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: BaseUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Overrides the redirect URI sent with the authorization-code grant.
    #[must_use]
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Overrides the requested token audience.
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to every HTTP request.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets how long before expiry the background refresh fires.
    #[must_use]
    pub const fn refresh_leeway(mut self, leeway: Duration) -> Self {
        self.refresh_leeway = Some(leeway);
        self
    }

    /// Sets the initial backoff after a failed background refresh.
    #[must_use]
    pub const fn refresh_retry_interval(mut self, interval: Duration) -> Self {
        self.refresh_retry_interval = Some(interval);
        self
    }

    /// Sets the maximum backoff after repeated refresh failures.
    #[must_use]
    pub const fn refresh_retry_max_interval(mut self, interval: Duration) -> Self {
        self.refresh_retry_max_interval = Some(interval);
        self
    }

    /// Builds the [`StockXConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id`,
    /// `client_secret` or `api_key` are not set, and
    /// [`ConfigError::EmptyAudience`] if the audience is blank.
    pub fn build(self) -> Result<StockXConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self.client_secret.ok_or(ConfigError::MissingRequiredField {
            field: "client_secret",
        })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let audience = self
            .audience
            .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());
        if audience.trim().is_empty() {
            return Err(ConfigError::EmptyAudience);
        }

        let token_url = match self.token_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_TOKEN_URL)?,
        };
        let api_base_url = match self.api_base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_API_BASE_URL)?,
        };

        let refresh_retry_interval = self
            .refresh_retry_interval
            .unwrap_or(DEFAULT_REFRESH_RETRY_INTERVAL);
        let refresh_retry_max_interval = self
            .refresh_retry_max_interval
            .unwrap_or(DEFAULT_REFRESH_RETRY_MAX_INTERVAL)
            .max(refresh_retry_interval);

        Ok(StockXConfig {
            client_id,
            client_secret,
            api_key,
            authorization_code: self.authorization_code,
            token_url,
            api_base_url,
            redirect_uri: self
                .redirect_uri
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            audience,
            user_agent_prefix: self.user_agent_prefix,
            request_timeout: self.request_timeout,
            refresh_leeway: self.refresh_leeway.unwrap_or(DEFAULT_REFRESH_LEEWAY),
            refresh_retry_interval,
            refresh_retry_max_interval,
        })
    }
}
