//! HTTP client types for StockX API communication.
//!
//! This module provides the transport layer shared by every StockX resource:
//! authenticated request construction, the status mapping and response
//! decoding.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`check_status`]: The status mapping used by every endpoint
//!
//! # Headers
//!
//! Every request carries `Authorization: Bearer <access token>`,
//! `x-api-key`, `Accept: application/json` and a `User-Agent`. Requests with
//! a body add `Content-Type: application/json`.
//!
//! # Retry Behavior
//!
//! Requests are never retried. A 401 surfaces as
//! [`StatusError::Unauthorized`]; the caller decides whether to refresh the
//! token and try again.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{check_status, HttpError, HttpResponseError, InvalidHttpRequestError, StatusError};
pub(crate) use http_client::build_reqwest_client;
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{path_segment, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
