//! Refresh-token grant for StockX.
//!
//! StockX access tokens expire after the `expires_in` seconds reported with
//! them. [`refresh_access_token`] obtains a new access token from the refresh
//! token held in a [`Session`].
//!
//! # Token Rotation
//!
//! The refresh response may carry a new refresh token. When it does, the
//! returned session holds the new one; otherwise the old refresh token is
//! kept.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockx_api::auth::oauth::refresh_access_token;
//!
//! let refreshed = refresh_access_token(&http, &config, &session).await?;
//! assert_eq!(refreshed.refresh_token, session.refresh_token);
//! ```

use serde::Serialize;

use super::token_request::{post_token_form, require_token};
use crate::auth::oauth::AuthError;
use crate::auth::session::{RefreshTokenResponse, Session};
use crate::config::StockXConfig;

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Request body for token refresh.
#[derive(Serialize)]
struct TokenRefreshRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    audience: &'a str,
}

/// Refreshes the access token of `session`.
///
/// Returns a new session; `session` itself is not modified.
///
/// # Errors
///
/// - [`AuthError::MissingRefreshToken`] if `session` has no refresh token; no
///   request is sent
/// - [`AuthError::AuthenticationFailed`] if the token endpoint rejects the refresh
/// - [`AuthError::Transport`] on network failure
/// - [`AuthError::Decode`] if the response is not a token response
/// - [`AuthError::InvalidTokenResponse`] if the access token is empty
#[tracing::instrument(skip_all, fields(token_url = %config.token_url()))]
pub async fn refresh_access_token(
    client: &reqwest::Client,
    config: &StockXConfig,
    session: &Session,
) -> Result<Session, AuthError> {
    if !session.can_refresh() {
        return Err(AuthError::MissingRefreshToken);
    }

    let request = TokenRefreshRequest {
        grant_type: REFRESH_TOKEN_GRANT_TYPE,
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        refresh_token: &session.refresh_token,
        audience: config.audience(),
    };

    let response: RefreshTokenResponse =
        post_token_form(client, config, REFRESH_TOKEN_GRANT_TYPE, &request).await?;
    require_token(&response.access_token, "access_token")?;

    tracing::debug!(
        expires_in = response.expires_in,
        rotated = response.refresh_token.is_some(),
        "Refreshed StockX access token"
    );

    Ok(session.refreshed(response))
}
