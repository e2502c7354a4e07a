//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated StockX OAuth client ID.
///
/// # Example
///
/// ```rust
/// use stockx_api::ClientId;
///
/// let id = ClientId::new("my-client-id").unwrap();
/// assert_eq!(id.as_ref(), "my-client-id");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Declares a non-empty string newtype whose `Debug` output hides the value.
macro_rules! secret_newtype {
    ($(#[$meta:meta])* $name:ident, $error:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Creates a new validated value.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err($error);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }
    };
}

secret_newtype!(
    /// A validated StockX OAuth client secret.
    ///
    /// The `Debug` implementation masks the secret value, displaying only
    /// `ClientSecret(*****)`.
    ///
    /// ```rust
    /// use stockx_api::ClientSecret;
    ///
    /// let secret = ClientSecret::new("my-secret").unwrap();
    /// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
    /// ```
    ClientSecret,
    ConfigError::EmptyClientSecret
);

secret_newtype!(
    /// A validated StockX API key, sent as the `x-api-key` header.
    ApiKey,
    ConfigError::EmptyApiKey
);

secret_newtype!(
    /// A one-time OAuth authorization code obtained from the StockX consent
    /// redirect.
    AuthorizationCode,
    ConfigError::EmptyAuthorizationCode
);

/// A validated absolute URL used for StockX endpoints.
///
/// Trailing slashes are removed so paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use stockx_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.stockx.com/v2/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.stockx.com/v2");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.stockx.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidUrl { url });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Appends a relative path to this URL.
    ///
    /// ```rust
    /// use stockx_api::BaseUrl;
    ///
    /// let base = BaseUrl::new("https://api.stockx.com/v2").unwrap();
    /// assert_eq!(base.join("/selling/orders"), "https://api.stockx.com/v2/selling/orders");
    /// ```
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty_string() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
        assert!(matches!(ClientId::new("   "), Err(ConfigError::EmptyClientId)));
    }

    #[test]
    fn test_secret_types_reject_empty_strings() {
        assert!(matches!(
            ClientSecret::new(""),
            Err(ConfigError::EmptyClientSecret)
        ));
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(
            AuthorizationCode::new(""),
            Err(ConfigError::EmptyAuthorizationCode)
        ));
    }

    #[test]
    fn test_secret_types_mask_value_in_debug() {
        let secret = ClientSecret::new("super-secret").unwrap();
        assert_eq!(format!("{secret:?}"), "ClientSecret(*****)");

        let key = ApiKey::new("api-key-value").unwrap();
        let debug_output = format!("{key:?}");
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("api-key-value"));

        let code = AuthorizationCode::new("one-time-code").unwrap();
        assert_eq!(format!("{code:?}"), "AuthorizationCode(*****)");
        assert_eq!(code.as_ref(), "one-time-code");
    }

    #[test]
    fn test_base_url_strips_trailing_slashes() {
        let url = BaseUrl::new("https://api.stockx.com/v2//").unwrap();
        assert_eq!(url.as_ref(), "https://api.stockx.com/v2");
    }

    #[test]
    fn test_base_url_parses_host_and_port() {
        let url = BaseUrl::new("http://127.0.0.1:8080/oauth/token").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("api.stockx.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://api.stockx.com").is_err());
        assert!(BaseUrl::new("https:///v2").is_err());
    }

    #[test]
    fn test_base_url_join() {
        let url = BaseUrl::new("https://api.stockx.com/v2").unwrap();
        assert_eq!(
            url.join("catalog/products/abc"),
            "https://api.stockx.com/v2/catalog/products/abc"
        );
        assert_eq!(
            url.join("/selling/listings"),
            "https://api.stockx.com/v2/selling/listings"
        );
    }
}
