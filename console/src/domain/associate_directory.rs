//! Loads the full associate collection by following cursor pages.

use std::sync::Arc;

use pagination::{Collected, FollowLimits, Page, follow_pages};
use tracing::{debug, warn};

use super::associate::Associate;
use super::ports::{ApiClient, ApiClientError};

/// Default collection endpoint.
pub const ASSOCIATES_PATH: &str = "/associates/";

/// Domain service reading every associate page through the [`ApiClient`] port.
#[derive(Clone)]
pub struct AssociateDirectory {
    client: Arc<dyn ApiClient>,
    start_path: String,
    limits: FollowLimits,
}

impl AssociateDirectory {
    /// Directory reading from [`ASSOCIATES_PATH`] with default limits.
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            start_path: ASSOCIATES_PATH.to_owned(),
            limits: FollowLimits::default(),
        }
    }

    /// Override the path of the first page.
    pub fn with_start_path(mut self, start_path: impl Into<String>) -> Self {
        self.start_path = start_path.into();
        self
    }

    /// Override the page ceiling.
    pub fn with_limits(mut self, limits: FollowLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch every page sequentially and return the concatenated records.
    ///
    /// Never fails: a page that cannot be fetched or decoded stops the walk
    /// and the result carries a truncation marker alongside the records read
    /// so far.
    pub async fn fetch_all(&self) -> Collected<Associate> {
        let collected = follow_pages(&self.start_path, self.limits, |link| {
            let client = Arc::clone(&self.client);
            async move {
                let body = client.get(&link).await?;
                Page::<Associate>::from_value(body)
                    .map_err(|error| ApiClientError::decode(error.to_string()))
            }
        })
        .await;

        match collected.truncation() {
            Some(truncation) => warn!(
                link = truncation.link(),
                reason = %truncation.reason(),
                pages = collected.pages_fetched(),
                records = collected.items().len(),
                "associate collection truncated"
            ),
            None => debug!(
                pages = collected.pages_fetched(),
                records = collected.items().len(),
                "associate collection loaded"
            ),
        }
        collected
    }
}
