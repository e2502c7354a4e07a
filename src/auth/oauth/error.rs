//! OAuth-specific error types for the StockX API SDK.
//!
//! # Example
//!
//! ```rust
//! use stockx_api::auth::oauth::AuthError;
//!
//! let error = AuthError::AuthenticationFailed {
//!     status: 400,
//!     body: r#"{"error":"invalid_grant"}"#.to_string(),
//! };
//! assert_eq!(error.status(), Some(400));
//! assert!(error.to_string().contains("invalid_grant"));
//! ```

use thiserror::Error;

/// Errors that can occur while obtaining or refreshing StockX tokens.
///
/// A failed call never modifies the stored session.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request could not be sent or its body could not be read.
    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token endpoint answered with a non-200 status.
    #[error("Authentication failed with status {status}: {body}")]
    AuthenticationFailed {
        /// HTTP status code returned by the token endpoint.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The token endpoint answered 200 with a body that is not a token response.
    #[error("Failed to decode token response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The token endpoint answered 200 but left a required token empty.
    #[error("Token response has an empty {field}")]
    InvalidTokenResponse {
        /// Name of the empty field.
        field: &'static str,
    },

    /// No authorization code is configured.
    #[error("No authorization code configured. Set one with StockXConfigBuilder::authorization_code.")]
    MissingAuthorizationCode,

    /// The session holds no refresh token.
    #[error("No refresh token available. Authenticate or restore a session first.")]
    MissingRefreshToken,
}

impl AuthError {
    /// Returns the HTTP status of a rejected token request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
