//! Authorization-code grant for StockX.
//!
//! StockX redirects the user back to the registered redirect URI with a
//! one-time `code`. [`exchange_authorization_code`] trades that code for an
//! access token and a refresh token.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockx_api::auth::oauth::exchange_authorization_code;
//!
//! let http = reqwest::Client::new();
//! let session = exchange_authorization_code(&http, &config).await?;
//! println!("token valid for {} seconds", session.expires_in);
//! ```

use serde::Serialize;

use super::token_request::{post_token_form, require_token};
use crate::auth::oauth::AuthError;
use crate::auth::session::{AuthorizationTokenResponse, Session};
use crate::config::StockXConfig;

/// Grant type for authorization-code requests.
const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// Request body for the authorization-code grant.
#[derive(Serialize)]
struct AuthorizationCodeRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// Exchanges the configured authorization code for a new [`Session`].
///
/// # Errors
///
/// - [`AuthError::MissingAuthorizationCode`] if no code is configured; no
///   request is sent
/// - [`AuthError::AuthenticationFailed`] if the token endpoint rejects the code
/// - [`AuthError::Transport`] on network failure
/// - [`AuthError::Decode`] if the response is not a token response
/// - [`AuthError::InvalidTokenResponse`] if the access or refresh token is empty
#[tracing::instrument(skip_all, fields(token_url = %config.token_url()))]
pub async fn exchange_authorization_code(
    client: &reqwest::Client,
    config: &StockXConfig,
) -> Result<Session, AuthError> {
    let code = config
        .authorization_code()
        .ok_or(AuthError::MissingAuthorizationCode)?;

    let request = AuthorizationCodeRequest {
        grant_type: AUTHORIZATION_CODE_GRANT_TYPE,
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        code: code.as_ref(),
        redirect_uri: config.redirect_uri(),
    };

    let response: AuthorizationTokenResponse =
        post_token_form(client, config, AUTHORIZATION_CODE_GRANT_TYPE, &request).await?;
    require_token(&response.access_token, "access_token")?;
    require_token(&response.refresh_token, "refresh_token")?;

    tracing::debug!(expires_in = response.expires_in, "Obtained StockX access token");

    Ok(Session::from_authorization_response(response))
}
