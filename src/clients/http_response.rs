//! HTTP response types for the StockX API SDK.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// An HTTP response from the StockX API.
///
/// The body is kept as text; use [`HttpResponse::json`] to decode it.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code == 200
    }

    /// Returns the first value of the header `name`, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body decodes as JSON `null`, so endpoints without a payload
    /// can be read as `()` or `Option<T>`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let body = self.body.trim();
        if body.is_empty() {
            serde_json::from_str("null")
        } else {
            serde_json::from_str(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: String,
    }

    fn response(body: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-1".to_string()]);
        HttpResponse::new(200, headers, body.to_string())
    }

    #[test]
    fn test_json_decodes_body() {
        let payload: Payload = response(r#"{"id":"abc"}"#).json().unwrap();
        assert_eq!(payload.id, "abc");
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        assert!(response("").json::<()>().is_ok());
        let missing: Option<Payload> = response("  ").json().unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_mismatched_body_is_error() {
        assert!(response("not json").json::<Payload>().is_err());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response("{}");
        assert_eq!(response.header("X-Request-Id"), Some("req-1"));
        assert_eq!(response.request_id(), Some("req-1"));
        assert!(response.is_ok());
    }
}
