//! Reqwest-backed REST API client adapter.
//!
//! This adapter owns transport details only: URL resolution against the API
//! base, bearer authentication, timeout, HTTP error mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use pagination::resolve_link;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{ApiClient, ApiClientError, QueryParam};

/// [`ApiClient`] implementation talking JSON over HTTP.
pub struct ReqwestApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ReqwestApiClient {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL relative paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, ApiClientError> {
        resolve_link(&self.base_url, path).map_err(|err| ApiClientError::no_response(err.to_string()))
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Value, ApiClientError> {
        let response = self
            .authorise(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_body(body.as_ref())
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn get(&self, path: &str) -> Result<Value, ApiClientError> {
        let url = self.resolve(path)?;
        debug!(url = %url, "GET");
        self.dispatch(self.client.get(url)).await
    }

    async fn post(
        &self,
        path: &str,
        body: &Value,
        params: &[QueryParam],
    ) -> Result<Value, ApiClientError> {
        let mut url = self.resolve(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                params
                    .iter()
                    .map(|param| (param.key.as_str(), param.value.as_str())),
            );
        }
        debug!(url = %url, "POST");
        self.dispatch(self.client.post(url).json(body)).await
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ApiClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|error| ApiClientError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiClientError {
    if error.is_timeout() {
        ApiClientError::no_response(format!("request timed out: {error}"))
    } else {
        ApiClientError::no_response(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiClientError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        body_preview
    };
    ApiClientError::error_response(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
