//! Form-encoded POST to the StockX token endpoint.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::oauth::AuthError;
use crate::config::StockXConfig;

/// Posts `form` to the configured token endpoint and decodes a 200 response.
///
/// Any other status is returned as [`AuthError::AuthenticationFailed`] with
/// the raw body.
pub(super) async fn post_token_form<F, T>(
    client: &reqwest::Client,
    config: &StockXConfig,
    grant_type: &'static str,
    form: &F,
) -> Result<T, AuthError>
where
    F: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = client
        .post(config.token_url().as_ref())
        .header(reqwest::header::ACCEPT, "application/json")
        .form(form)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status != 200 {
        tracing::warn!(grant_type, status, "StockX token request rejected");
        return Err(AuthError::AuthenticationFailed { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Rejects a token response field that is empty or blank.
pub(super) fn require_token(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        tracing::warn!(field, "StockX token response is missing a token");
        return Err(AuthError::InvalidTokenResponse { field });
    }
    Ok(())
}
