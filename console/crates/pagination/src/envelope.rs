//! The `{results, next}` page envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PaginationError;

/// One page of a cursor-paginated collection.
///
/// ## Invariants
/// - `next` is `None` on the final page. An absent field and a blank string
///   are treated the same way as `null`.
/// - `results` keeps the order in which the server emitted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    results: Vec<T>,
    #[serde(default)]
    next: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from its records and optional next link.
    #[must_use]
    pub const fn new(results: Vec<T>, next: Option<String>) -> Self {
        Self { results, next }
    }

    /// Records carried by this page.
    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Link to the following page, or `None` when this is the last page.
    ///
    /// ```
    /// use pagination::Page;
    ///
    /// let last: Page<u8> = Page::new(vec![], Some("  ".to_owned()));
    /// assert_eq!(last.next_link(), None);
    /// ```
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.next
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// Split the page into its records and normalised next link.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        let next = self.next_link().map(str::to_owned);
        (self.results, next)
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a page from an already-parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::Decode`] when `results` is missing or any
    /// record fails to deserialise.
    ///
    /// ```
    /// use pagination::Page;
    /// use serde_json::json;
    ///
    /// let page: Page<u32> = Page::from_value(json!({"results": [1, 2], "next": null}))?;
    /// assert_eq!(page.results(), &[1, 2]);
    /// # Ok::<(), pagination::PaginationError>(())
    /// ```
    pub fn from_value(value: Value) -> Result<Self, PaginationError> {
        serde_json::from_value(value).map_err(|error| PaginationError::Decode {
            message: error.to_string(),
        })
    }
}
