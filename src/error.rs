//! Error types for the StockX API SDK.
//!
//! This module contains the configuration and validation errors raised while
//! building a [`StockXConfig`](crate::StockXConfig).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use stockx_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID of your StockX application.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret of your StockX application.")]
    EmptyClientSecret,

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid StockX API key.")]
    EmptyApiKey,

    /// Authorization code cannot be empty.
    #[error("Authorization code cannot be empty. Use the `code` value StockX appended to your redirect URI.")]
    EmptyAuthorizationCode,

    /// Token audience cannot be empty.
    #[error("Token audience cannot be empty.")]
    EmptyAudience,

    /// A configured URL is invalid.
    #[error("Invalid URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.stockx.com/v2').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
