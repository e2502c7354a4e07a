//! Authentication types for the StockX API SDK.
//!
//! # Overview
//!
//! - [`Session`]: The current access token, refresh token and expiry
//! - [`SessionStore`]: Shared holder of the session read by every request
//! - [`oauth`]: Token grants and the background [`oauth::TokenRefresher`]
//!
//! # Lifecycle
//!
//! A client starts with an empty session. Authentication fills it, and every
//! refresh replaces the access token and expiry. The session is never cleared
//! while the client lives; a failed refresh leaves the stale token in place.
//!
//! # Example
//!
//! ```rust
//! use stockx_api::auth::{Session, SessionStore};
//!
//! let store = SessionStore::new(Session::new("access", "refresh", 3600));
//! assert_eq!(store.access_token(), "access");
//! ```

pub mod oauth;
pub mod session;

pub use session::{Session, SessionStore};
