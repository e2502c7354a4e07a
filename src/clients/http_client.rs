//! HTTP client for StockX API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the StockX API.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::auth::SessionStore;
use crate::clients::errors::{check_status, HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiKey, BaseUrl, StockXConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the `reqwest` client shared by API and token requests.
pub(crate) fn build_reqwest_client(config: &StockXConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().use_rustls_tls();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// HTTP client for making requests to the StockX API.
///
/// The client handles:
/// - URL construction from the configured API base URL
/// - Default headers including `User-Agent` and `Accept`
/// - The `x-api-key` header and the current bearer token
/// - The shared status mapping of every endpoint
///
/// The bearer token is read from the [`SessionStore`] for each request, so a
/// refresh applies to the next request without rebuilding the client.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use stockx_api::auth::SessionStore;
/// use stockx_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&config, SessionStore::default())?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "selling/orders/active")
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// API base URL (e.g., `https://api.stockx.com/v2`).
    base_url: BaseUrl,
    api_key: ApiKey,
    session: SessionStore,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client reading tokens from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &StockXConfig, session: SessionStore) -> Result<Self, HttpError> {
        let client = build_reqwest_client(config)?;
        Ok(Self::with_client(client, config, session))
    }

    /// Creates a new HTTP client on top of an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &StockXConfig, session: SessionStore) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}StockX API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            client,
            base_url: config.api_base_url().clone(),
            api_key: config.api_key().clone(),
            session,
            default_headers,
        }
    }

    /// Returns the API base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session store the bearer token is read from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) const fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Sends an HTTP request to the StockX API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - The status is anything but 200 (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        let mut headers = self.default_headers.clone();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.session.access_token()),
        );
        headers.insert("x-api-key".to_string(), self.api_key.as_ref().to_string());
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending StockX API request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;
        let response = HttpResponse::new(code, res_headers, body);

        if let Err(status) = check_status(code) {
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                status = code,
                "StockX API request failed: {status}"
            );
            return Err(HttpError::Response(HttpResponseError {
                status,
                error_reference: response.request_id().map(String::from),
                message: response.body,
            }));
        }

        Ok(response)
    }

    /// Sends a request and decodes the 200 response body as `T`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`HttpClient::request`], plus
    /// [`HttpError::Decode`] if the body does not match `T`.
    pub async fn request_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, HttpError> {
        let path = request.path.clone();
        let response = self.request(request).await?;
        response.json().map_err(|error| {
            tracing::warn!(path = %path, "Failed to decode StockX API response: {error}");
            HttpError::Decode(error)
        })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::config::{ClientId, ClientSecret};

    fn test_config(prefix: Option<&str>) -> StockXConfig {
        let mut builder = StockXConfig::builder()
            .client_id(ClientId::new("client-id").unwrap())
            .client_secret(ClientSecret::new("client-secret").unwrap())
            .api_key(ApiKey::new("api-key").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_client_uses_configured_base_url() {
        let client = HttpClient::new(&test_config(None), SessionStore::default()).unwrap();
        assert_eq!(client.base_url().as_ref(), "https://api.stockx.com/v2");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&test_config(None), SessionStore::default()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("StockX API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client =
            HttpClient::new(&test_config(Some("MyApp/1.0")), SessionStore::default()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | StockX API Library"));
    }

    #[test]
    fn test_session_store_is_shared() {
        let store = SessionStore::default();
        let client = HttpClient::new(&test_config(None), store.clone()).unwrap();

        store.replace(Session::new("fresh-token", "R", 60));
        assert_eq!(client.session().access_token(), "fresh-token");
    }

    #[test]
    fn test_default_headers_do_not_contain_credentials() {
        let client = HttpClient::new(&test_config(None), SessionStore::default()).unwrap();
        assert!(client.default_headers().get("x-api-key").is_none());
        assert!(client.default_headers().get("Authorization").is_none());
    }
}
