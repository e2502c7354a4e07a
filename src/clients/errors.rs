//! HTTP-specific error types for the StockX API SDK.
//!
//! # Error Handling
//!
//! Every StockX endpoint shares one status mapping, implemented by
//! [`check_status`]:
//!
//! | Status | Result |
//! |--------|--------|
//! | 200 | success |
//! | 401 | [`StatusError::Unauthorized`] |
//! | 400 | [`StatusError::BadRequest`] |
//! | 500 | [`StatusError::Internal`] |
//! | other | [`StatusError::UnknownStatus`] |
//!
//! Request-level failures are reported through [`HttpError`]:
//!
//! - [`HttpResponseError`]: a response rejected by the status mapping
//! - [`InvalidHttpRequestError`]: a request that fails validation before sending
//! - `Network`: transport failure
//! - `Decode`: a 200 response whose body does not match the expected shape
//!
//! # Example
//!
//! ```rust
//! use stockx_api::clients::{check_status, StatusError};
//!
//! assert!(check_status(200).is_ok());
//! assert_eq!(check_status(401), Err(StatusError::Unauthorized));
//! assert_eq!(check_status(404), Err(StatusError::UnknownStatus(404)));
//! ```

use thiserror::Error;

/// Classification of a non-200 StockX response status.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusError {
    /// The access token was rejected (401).
    #[error("unauthorized")]
    Unauthorized,

    /// The request was malformed (400).
    #[error("bad request")]
    BadRequest,

    /// StockX failed to process the request (500).
    #[error("internal server error")]
    Internal,

    /// Any other status code.
    #[error("unknown status code {0}")]
    UnknownStatus(u16),
}

impl StatusError {
    /// Returns the HTTP status code this error was produced from.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::BadRequest => 400,
            Self::Internal => 500,
            Self::UnknownStatus(code) => *code,
        }
    }
}

/// Maps a response status code to success or a [`StatusError`].
///
/// Only 200 counts as success; every other code, including other 2xx codes,
/// yields an error.
///
/// # Errors
///
/// Returns the [`StatusError`] matching `code` when `code` is not 200.
pub const fn check_status(code: u16) -> Result<(), StatusError> {
    match code {
        200 => Ok(()),
        401 => Err(StatusError::Unauthorized),
        400 => Err(StatusError::BadRequest),
        500 => Err(StatusError::Internal),
        other => Err(StatusError::UnknownStatus(other)),
    }
}

/// Error returned when a StockX response fails the status mapping.
///
/// # Example
///
/// ```rust
/// use stockx_api::clients::{HttpResponseError, StatusError};
///
/// let error = HttpResponseError {
///     status: StatusError::BadRequest,
///     message: r#"{"errorMessage":"invalid variantId"}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert_eq!(error.status.code(), 400);
/// assert!(error.to_string().contains("bad request"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct HttpResponseError {
    /// The mapped status.
    pub status: StatusError,
    /// The raw response body.
    pub message: String,
    /// Reference ID for error reporting (from the `x-request-id` header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// ```rust
/// use stockx_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::EmptyPathSegment { name: "listing_id" };
/// assert_eq!(error.to_string(), "Path parameter 'listing_id' cannot be empty.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// A caller-supplied path parameter is empty.
    #[error("Path parameter '{name}' cannot be empty.")]
    EmptyPathSegment {
        /// The name of the parameter.
        name: &'static str,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// ```rust,ignore
/// use stockx_api::clients::{HttpError, StatusError};
///
/// match client.get_order("123-456").await {
///     Ok(order) => println!("{:?}", order.status),
///     Err(HttpError::Response(e)) if e.status == StatusError::Unauthorized => {
///         client.refresh_token().await?;
///     }
///     Err(e) => eprintln!("request failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// A response rejected by the status mapping.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns the mapped status if this error came from a StockX response.
    #[must_use]
    pub const fn status(&self) -> Option<StatusError> {
        match self {
            Self::Response(error) => Some(error.status),
            _ => None,
        }
    }
}
