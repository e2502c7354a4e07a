//! # StockX API Rust SDK
//!
//! An async Rust SDK for the StockX public API, handling the OAuth token
//! lifecycle and providing typed access to orders, listings and the catalog.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`StockXConfig`] and [`StockXConfigBuilder`]
//! - Validated newtypes for credentials and endpoint URLs
//! - The OAuth authorization-code and refresh-token grants via [`auth::oauth`]
//! - A shared [`Session`] kept fresh by a background refresher
//! - An async HTTP client with the StockX status mapping
//! - Orders, listings and catalog operations on [`StockXClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use stockx_api::{ApiKey, AuthorizationCode, ClientId, ClientSecret, StockXConfig};
//!
//! let config = StockXConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .authorization_code(AuthorizationCode::new("code-from-redirect").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Authentication
//!
//! ```rust,ignore
//! use stockx_api::StockXClient;
//!
//! let client = StockXClient::new(config)?;
//!
//! // Exchanges the authorization code and starts the background refresher
//! client.authenticate().await?;
//!
//! // Follow refresh outcomes
//! let mut events = client.subscribe_refresh_events();
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//! });
//! ```
//!
//! ## Restoring a Session
//!
//! [`Session`] is serializable. A saved session can be restored without a new
//! authorization code:
//!
//! ```rust,ignore
//! use stockx_api::{Session, StockXClient};
//!
//! let session: Session = serde_json::from_str(&saved)?;
//! let client = StockXClient::with_session(config, session)?;
//! client.start_auto_refresh();
//! ```
//!
//! ## Resources
//!
//! ```rust,ignore
//! use stockx_api::resources::{ActiveOrdersParams, CatalogSearchParams, CreateListing};
//!
//! let orders = client.get_active_orders(ActiveOrdersParams::default()).await?;
//! let products = client.search_catalog(CatalogSearchParams::new("jordan 1")).await?;
//! let operation = client.create_listing(CreateListing::new("180", "variant-id")).await?;
//! ```
//!
//! ## Errors
//!
//! - [`ConfigError`]: invalid configuration
//! - [`AuthError`]: token grant failures
//! - [`HttpError`]: resource request failures, with [`StatusError`] for
//!   non-200 responses
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events and installs no subscriber.

mod client;

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

pub use client::StockXClient;

// Re-export public types at crate root for convenience
pub use auth::{Session, SessionStore};
pub use config::{
    ApiKey, AuthorizationCode, BaseUrl, ClientId, ClientSecret, StockXConfig, StockXConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    check_status, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, StatusError,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{
    exchange_authorization_code, refresh_access_token, AuthError, RefreshEvent, RefreshSchedule,
    TokenRefresher,
};
