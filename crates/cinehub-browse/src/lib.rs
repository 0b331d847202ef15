//! Browsing core for cinehub.
//!
//! Owns the category/pagination state machine that drives list browsing,
//! the pagination window shown under the result list, the route surface,
//! and the loaders behind the title, person and watch views.

/// Browse categories and page requests.
pub mod category;
/// Title details (credits, providers, trailer).
pub mod detail;
/// Typed errors for fetches, transitions and routes.
pub mod error;
/// Category fetcher contract and the TMDB adapter.
pub mod fetcher;
/// Result items decoded from list pages.
pub mod item;
/// Browse state machine.
pub mod machine;
/// Pagination window calculation.
pub mod pagination;
/// Person details and filmography.
pub mod person;
/// Route parsing and formatting.
pub mod route;
/// Watch sessions and season/episode selection.
pub mod watch;

#[cfg(test)]
mod test_support;

pub use category::{Category, PageRequest};
pub use error::{FetchError, InvalidInput, RouteError};
pub use fetcher::{CategoryFetcher, LocalCategoryFetcher, TmdbCategoryFetcher};
pub use item::{ResultItem, ResultPage};
pub use machine::{
    Applied, BrowseMachine, BrowseState, EMPTY_RESULTS_MESSAGE, FetchOutcome, MAX_TOTAL_PAGES,
    PendingFetch,
};
pub use pagination::{PageEntry, compute_window};
pub use route::Route;
