//! Test utilities for the console crate.
//!
//! This module provides shared doubles for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::Associate;
use crate::domain::ports::{ApiClient, ApiClientError, QueryParam};

/// One request observed by [`ScriptedApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// A GET request.
    Get {
        /// Requested path or URL.
        path: String,
    },
    /// A POST request.
    Post {
        /// Requested path.
        path: String,
        /// JSON body.
        body: Value,
        /// Query parameters.
        params: Vec<QueryParam>,
    },
}

/// [`ApiClient`] double answering from scripted responses.
///
/// GET responses are keyed by path and may be requested repeatedly. POST
/// responses are consumed in order; an exhausted queue answers with
/// [`ApiClientError::NoResponse`].
#[derive(Debug, Default)]
pub struct ScriptedApiClient {
    gets: Mutex<HashMap<String, Result<Value, ApiClientError>>>,
    posts: Mutex<VecDeque<Result<Value, ApiClientError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApiClient {
    /// Client with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET `path` with `body`.
    pub fn with_get(self, path: impl Into<String>, body: Value) -> Self {
        lock(&self.gets).insert(path.into(), Ok(body));
        self
    }

    /// Answer GET `path` with `error`.
    pub fn with_get_failure(self, path: impl Into<String>, error: ApiClientError) -> Self {
        lock(&self.gets).insert(path.into(), Err(error));
        self
    }

    /// Serve `pages` as a linked chain starting at `start`.
    ///
    /// Page `n > 1` lives at `{start}?page={n}`; the last page has a `null`
    /// next link.
    pub fn with_associate_pages(self, start: &str, pages: &[Vec<Associate>]) -> Self {
        let count = pages.len();
        {
            let mut gets = lock(&self.gets);
            for (index, results) in pages.iter().enumerate() {
                let number = index + 1;
                let next = (number < count).then(|| page_link(start, number + 1));
                gets.insert(
                    page_link(start, number),
                    Ok(json!({ "results": results, "next": next })),
                );
            }
        }
        self
    }

    /// Queue the response to the next POST.
    pub fn with_post_response(self, response: Result<Value, ApiClientError>) -> Self {
        lock(&self.posts).push_back(response);
        self
    }

    /// Requests observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }
}

/// Link of page `number` in a chain served by
/// [`ScriptedApiClient::with_associate_pages`].
pub fn page_link(start: &str, number: usize) -> String {
    if number <= 1 {
        start.to_owned()
    } else {
        format!("{start}?page={number}")
    }
}

#[async_trait]
impl ApiClient for ScriptedApiClient {
    async fn get(&self, path: &str) -> Result<Value, ApiClientError> {
        lock(&self.calls).push(RecordedCall::Get {
            path: path.to_owned(),
        });
        lock(&self.gets)
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ApiClientError::error_response(404_u16, format!("no page at {path}"))))
    }

    async fn post(
        &self,
        path: &str,
        body: &Value,
        params: &[QueryParam],
    ) -> Result<Value, ApiClientError> {
        lock(&self.calls).push(RecordedCall::Post {
            path: path.to_owned(),
            body: body.clone(),
            params: params.to_vec(),
        });
        lock(&self.posts)
            .pop_front()
            .unwrap_or_else(|| Err(ApiClientError::no_response("no scripted POST response")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
