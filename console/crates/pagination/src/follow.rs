//! Sequential page-following aggregator.

use std::fmt;
use std::future::Future;

use crate::Page;

const DEFAULT_MAX_PAGES: usize = 1000;

/// Bounds applied while following `next` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowLimits {
    max_pages: usize,
}

impl FollowLimits {
    /// Limit traversal to `max_pages` requests. Zero is raised to one.
    #[must_use]
    pub const fn new(max_pages: usize) -> Self {
        Self {
            max_pages: if max_pages == 0 { 1 } else { max_pages },
        }
    }

    /// Maximum number of pages requested before traversal stops.
    #[must_use]
    pub const fn max_pages(&self) -> usize {
        self.max_pages
    }
}

impl Default for FollowLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

/// Why traversal stopped before reaching the final page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruncationReason {
    /// The request for a page failed.
    PageFailed {
        /// Failure reported by the fetcher.
        message: String,
    },
    /// The page ceiling was reached while a `next` link remained.
    PageLimit {
        /// The configured ceiling.
        max_pages: usize,
    },
}

impl fmt::Display for TruncationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageFailed { message } => write!(f, "page request failed: {message}"),
            Self::PageLimit { max_pages } => write!(f, "page limit of {max_pages} reached"),
        }
    }
}

/// Marker describing where and why a traversal was cut short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    link: String,
    reason: TruncationReason,
}

impl Truncation {
    /// The link that was not (successfully) fetched.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Why traversal stopped.
    #[must_use]
    pub const fn reason(&self) -> &TruncationReason {
        &self.reason
    }
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stopped at {}: {}", self.link, self.reason)
    }
}

/// Records accumulated by [`follow_pages`].
///
/// ## Invariants
/// - `items` is the concatenation of every successfully fetched page in
///   request order.
/// - `truncation` is `None` exactly when the final page (one without a `next`
///   link) was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
    items: Vec<T>,
    pages_fetched: usize,
    truncation: Option<Truncation>,
}

impl<T> Collected<T> {
    /// A collection that reached its final page.
    #[must_use]
    pub const fn complete(items: Vec<T>, pages_fetched: usize) -> Self {
        Self {
            items,
            pages_fetched,
            truncation: None,
        }
    }

    /// Accumulated records in server emission order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of pages fetched successfully.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Truncation marker, present when traversal stopped early.
    #[must_use]
    pub const fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    /// Whether the final page was reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }

    /// Split into records and truncation marker.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<Truncation>) {
        (self.items, self.truncation)
    }
}

/// Follow `next` links from `start` until the final page, a failure, or the
/// page ceiling.
///
/// Requests are issued one at a time; the next page is only requested after
/// the previous one resolved. A failed request never propagates: whatever was
/// accumulated so far is returned with a [`Truncation`] marker.
pub async fn follow_pages<T, E, F, Fut>(
    start: &str,
    limits: FollowLimits,
    mut fetch: F,
) -> Collected<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    E: fmt::Display,
{
    let mut items = Vec::new();
    let mut pages_fetched = 0_usize;
    let mut next = Some(start.to_owned());

    while let Some(link) = next.take() {
        if pages_fetched >= limits.max_pages() {
            return Collected {
                items,
                pages_fetched,
                truncation: Some(Truncation {
                    link,
                    reason: TruncationReason::PageLimit {
                        max_pages: limits.max_pages(),
                    },
                }),
            };
        }

        match fetch(link.clone()).await {
            Ok(page) => {
                pages_fetched += 1;
                let (results, following) = page.into_parts();
                items.extend(results);
                next = following;
            }
            Err(error) => {
                return Collected {
                    items,
                    pages_fetched,
                    truncation: Some(Truncation {
                        link,
                        reason: TruncationReason::PageFailed {
                            message: error.to_string(),
                        },
                    }),
                };
            }
        }
    }

    Collected {
        items,
        pages_fetched,
        truncation: None,
    }
}

#[cfg(test)]
mod tests {
    //! Aggregation order, partial results and the page ceiling.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    type Scripted = HashMap<String, Result<Page<u32>, String>>;

    fn chain(pages: &[Vec<u32>]) -> Scripted {
        let mut scripted = HashMap::new();
        let count = pages.len();
        for (index, results) in pages.iter().enumerate() {
            let next = (index + 1 < count).then(|| format!("/items/?page={}", index + 2));
            scripted.insert(link_for(index), Ok(Page::new(results.clone(), next)));
        }
        scripted
    }

    fn link_for(index: usize) -> String {
        if index == 0 {
            "/items/".to_owned()
        } else {
            format!("/items/?page={}", index + 1)
        }
    }

    async fn run(scripted: &Scripted, limits: FollowLimits) -> (Collected<u32>, Vec<String>) {
        let requested = RefCell::new(Vec::new());
        let collected = follow_pages("/items/", limits, |link| {
            requested.borrow_mut().push(link.clone());
            let response = scripted
                .get(&link)
                .cloned()
                .unwrap_or_else(|| Err(format!("no page at {link}")));
            async move { response }
        })
        .await;
        (collected, requested.into_inner())
    }

    #[rstest]
    #[case::single(vec![vec![1, 2, 3]])]
    #[case::three_pages(vec![vec![1, 2], vec![3], vec![4, 5, 6]])]
    #[case::empty_middle_page(vec![vec![1], vec![], vec![2]])]
    #[tokio::test]
    async fn concatenates_pages_in_order(#[case] pages: Vec<Vec<u32>>) {
        let (collected, requested) = run(&chain(&pages), FollowLimits::default()).await;

        let expected: Vec<u32> = pages.iter().flat_map(|page| page.iter().copied()).collect();
        assert_eq!(collected.items(), expected.as_slice());
        assert!(collected.is_complete());
        assert_eq!(collected.pages_fetched(), pages.len());
        assert_eq!(requested.len(), pages.len());
    }

    #[rstest]
    #[tokio::test]
    async fn failure_keeps_earlier_pages_and_marks_truncation() {
        let mut scripted = chain(&[vec![1, 2], vec![3], vec![4]]);
        scripted.insert(link_for(2), Err("503 service unavailable".to_owned()));

        let (collected, _) = run(&scripted, FollowLimits::default()).await;

        assert_eq!(collected.items(), &[1, 2, 3]);
        assert_eq!(collected.pages_fetched(), 2);
        let truncation = collected.truncation();
        assert_eq!(truncation.map(Truncation::link), Some("/items/?page=3"));
        assert!(matches!(
            truncation.map(Truncation::reason),
            Some(TruncationReason::PageFailed { message }) if message.contains("503")
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn first_page_failure_yields_empty_truncated_result() {
        let mut scripted = Scripted::new();
        scripted.insert(link_for(0), Err("connection refused".to_owned()));

        let (collected, _) = run(&scripted, FollowLimits::default()).await;

        assert!(collected.items().is_empty());
        assert!(!collected.is_complete());
    }

    #[rstest]
    #[tokio::test]
    async fn page_ceiling_stops_self_referencing_chain() {
        let mut scripted = Scripted::new();
        scripted.insert(
            link_for(0),
            Ok(Page::new(vec![7], Some("/items/".to_owned()))),
        );

        let (collected, requested) = run(&scripted, FollowLimits::new(3)).await;

        assert_eq!(collected.items(), &[7, 7, 7]);
        assert_eq!(requested.len(), 3);
        assert!(matches!(
            collected.truncation().map(Truncation::reason),
            Some(TruncationReason::PageLimit { max_pages: 3 })
        ));
    }

    #[rstest]
    fn zero_page_limit_is_raised_to_one() {
        assert_eq!(FollowLimits::new(0).max_pages(), 1);
    }
}
