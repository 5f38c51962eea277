//! Cursor-page envelope and page-following primitives.
//!
//! Collection endpoints return one page at a time as `{results, next}` where
//! `next` is a link to the subsequent page or `null` on the final page. This
//! crate owns that envelope ([`Page`]), link resolution against an API base
//! ([`resolve_link`]) and the sequential aggregator ([`follow_pages`]) that
//! walks the chain and reports whether the collection was read completely.
//!
//! # Example
//!
//! ```
//! use pagination::{FollowLimits, Page, follow_pages};
//!
//! # tokio::runtime::Builder::new_current_thread().build().map(|rt| rt.block_on(async {
//! let collected = follow_pages("/items/", FollowLimits::default(), |url| async move {
//!     match url.as_str() {
//!         "/items/" => Ok::<_, String>(Page::new(vec![1, 2], Some("/items/?page=2".to_owned()))),
//!         _ => Ok(Page::new(vec![3], None)),
//!     }
//! })
//! .await;
//!
//! assert_eq!(collected.items(), &[1, 2, 3]);
//! assert!(collected.is_complete());
//! # })).ok();
//! ```

mod envelope;
mod error;
mod follow;
mod link;

pub use envelope::Page;
pub use error::PaginationError;
pub use follow::{Collected, FollowLimits, Truncation, TruncationReason, follow_pages};
pub use link::resolve_link;
