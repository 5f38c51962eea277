//! Error types for envelope decoding and link resolution.

use thiserror::Error;

/// Errors raised while decoding page envelopes or resolving page links.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The payload is not a valid `{results, next}` envelope.
    #[error("invalid page envelope: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// A page link was blank.
    #[error("page link must not be empty")]
    EmptyLink,

    /// A page link could not be turned into a URL.
    #[error("invalid page link '{link}': {message}")]
    InvalidLink {
        /// The offending link as received.
        link: String,
        /// Description of the parse failure.
        message: String,
    },
}
