//! Typed errors for the browsing core.

/// Failure of a category fetch.
///
/// Never surfaced to the user beyond the empty results view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),
    /// The response body or one of its items could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Classifies an upstream client error.
    ///
    /// Errors caused by JSON decoding are `Decode`; everything else is
    /// treated as `Network`.
    #[must_use]
    pub fn from_upstream(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if err.chain().any(|cause| cause.is::<serde_json::Error>()) {
            Self::Decode(message)
        } else {
            Self::Network(message)
        }
    }
}

/// Rejected transition input. Transitions returning this change nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// Search term was empty after normalization.
    #[error("search term is empty")]
    EmptySearchTerm,
    /// Requested page is outside `1..=total_pages`.
    #[error("page {page} is out of range (1..={total_pages})")]
    PageOutOfRange {
        /// Requested page.
        page: u32,
        /// Total pages of the displayed listing.
        total_pages: u32,
    },
    /// The category or route cannot be browsed directly.
    #[error("not a browsable category or route")]
    NotBrowsable,
}

/// Route parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum RouteError {
    /// The path matches no known route.
    #[error("unknown route: {0}")]
    Unknown(String),
    /// A numeric id segment failed to parse.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// The `page` query parameter is not a positive integer.
    #[error("invalid page: {0}")]
    InvalidPage(String),
    /// A category name is not recognized.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// `/search` without a usable `q` parameter.
    #[error("search route requires a non-empty q parameter")]
    MissingSearchTerm,
}
