//! OAuth 2.0 implementation for the StockX API.
//!
//! StockX issues tokens through two grants:
//!
//! - **Authorization Code Grant** ([`exchange_authorization_code`]): trades
//!   the one-time code from the consent redirect for an access token and a
//!   refresh token.
//! - **Refresh Token Grant** ([`refresh_access_token`]): trades the refresh
//!   token for a new access token.
//!
//! Both grants POST a form-encoded body to the configured token endpoint.
//!
//! # Background Refresh
//!
//! [`TokenRefresher`] keeps a session valid by refreshing it shortly before
//! expiry. It is normally managed by [`StockXClient`](crate::StockXClient),
//! which starts it after a successful authentication and stops it when the
//! client is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockx_api::auth::oauth::{exchange_authorization_code, refresh_access_token};
//!
//! let http = reqwest::Client::new();
//! let session = exchange_authorization_code(&http, &config).await?;
//! let session = refresh_access_token(&http, &config, &session).await?;
//! ```

mod authorization_code;
mod error;
mod refresher;
mod token_refresh;
mod token_request;

pub use authorization_code::exchange_authorization_code;
pub use error::AuthError;
pub(crate) use refresher::RefreshContext;
pub use refresher::{RefreshEvent, RefreshSchedule, TokenRefresher, MIN_REFRESH_DELAY};
pub use token_refresh::refresh_access_token;
