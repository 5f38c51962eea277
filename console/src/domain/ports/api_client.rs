//! Driven port for the backend REST API.
//!
//! Screens only see JSON bodies and a three-way failure split: no response at
//! all, a response with an error status, or a successful response whose body
//! could not be decoded. Authentication headers and transport concerns belong
//! to the adapter.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// One query-string pair attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    /// Parameter name.
    pub key: String,
    /// Parameter value.
    pub value: String,
}

impl QueryParam {
    /// Build a query parameter from borrowed or owned strings.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

define_port_error! {
    /// Errors surfaced by the REST API client.
    pub enum ApiClientError {
        /// The request never produced a response (connection refused, DNS,
        /// timeout, request construction failure).
        NoResponse { message: String } =>
            "no response from server: {message}",
        /// The server answered with a non-success status.
        ErrorResponse { status: u16, message: String } =>
            "server responded with status {status}: {message}",
        /// The server answered successfully but the body was not the expected JSON.
        Decode { message: String } =>
            "response decode failed: {message}",
    }
}

impl ApiClientError {
    /// Whether a response was received from the server.
    ///
    /// ```
    /// use console::domain::ports::ApiClientError;
    ///
    /// assert!(!ApiClientError::no_response("connection refused").has_response());
    /// assert!(ApiClientError::error_response(400_u16, "bad request").has_response());
    /// ```
    pub fn has_response(&self) -> bool {
        !matches!(self, Self::NoResponse { .. })
    }

    /// HTTP status of an error response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ErrorResponse { status, .. } => Some(*status),
            Self::NoResponse { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Port for issuing requests against the backend REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch the JSON body at `path`.
    ///
    /// `path` is either relative to the API base (`/associates/`) or an
    /// absolute URL such as a `next` link returned by a collection endpoint.
    async fn get(&self, path: &str) -> Result<Value, ApiClientError>;

    /// Post `body` as JSON to `path` with the given query parameters and
    /// return the response body.
    async fn post(
        &self,
        path: &str,
        body: &Value,
        params: &[QueryParam],
    ) -> Result<Value, ApiClientError>;
}
