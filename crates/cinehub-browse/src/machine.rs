//! Browse state machine.
//!
//! [`BrowseMachine`] is the single authority for what the result list
//! shows. Transitions validate their input and hand back a
//! [`PendingFetch`]; the caller runs it through a fetcher (inline via
//! [`BrowseMachine::dispatch`], or on a spawned task) and feeds the
//! [`FetchOutcome`] back to [`BrowseMachine::apply`]. Every dispatched
//! fetch carries a generation number and only the latest one may change
//! the displayed state.
#![allow(clippy::future_not_send)]

use crate::category::{Category, PageRequest};
use crate::error::{FetchError, InvalidInput};
use crate::fetcher::LocalCategoryFetcher;
use crate::item::{ResultItem, ResultPage};
use crate::pagination::{PageEntry, compute_window};
use crate::route::Route;

/// Upper bound on pages TMDB will serve for any listing.
pub const MAX_TOTAL_PAGES: u32 = 500;

/// Text shown when the displayed listing has no results.
pub const EMPTY_RESULTS_MESSAGE: &str = "No movies found";

/// What the result list currently displays.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowseState {
    /// Displayed category.
    pub category: Category,
    /// Search term (empty unless `category` is search).
    pub search_term: String,
    /// Displayed page (1-based).
    pub current_page: u32,
    /// Total pages, clamped to [`MAX_TOTAL_PAGES`]. Zero before the first
    /// successful fetch.
    pub total_pages: u32,
    /// Items of the displayed page.
    pub results: Vec<ResultItem>,
}

impl BrowseState {
    fn initial(category: Category) -> Self {
        Self {
            category,
            search_term: String::new(),
            current_page: 1,
            total_pages: 0,
            results: Vec::new(),
        }
    }

    /// Pagination bar for the displayed page.
    #[must_use]
    pub fn pagination(&self) -> Vec<PageEntry> {
        compute_window(self.current_page, self.total_pages)
    }

    /// Whether the empty-results message should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Request that would reload the displayed page.
    #[must_use]
    pub fn request(&self) -> PageRequest {
        PageRequest {
            category: self.category,
            term: self.search_term.clone(),
            page: self.current_page,
        }
    }
}

/// A fetch the machine has issued and is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    generation: u64,
    request: PageRequest,
}

impl PendingFetch {
    /// Generation stamped on this fetch.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Page to fetch.
    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Pairs this fetch with its result.
    #[must_use]
    pub fn complete(self, result: Result<ResultPage, FetchError>) -> FetchOutcome {
        FetchOutcome {
            generation: self.generation,
            request: self.request,
            result,
        }
    }
}

/// A completed fetch, ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    generation: u64,
    request: PageRequest,
    result: Result<ResultPage, FetchError>,
}

impl FetchOutcome {
    /// Generation of the fetch that produced this outcome.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Effect of [`BrowseMachine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// State replaced with the fetched page.
    Replaced,
    /// Fetch failed; results cleared.
    Failed,
    /// A newer fetch was dispatched; outcome discarded.
    Stale,
}

/// Category and pagination state machine.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowseMachine {
    state: BrowseState,
    start_category: Category,
    generation: u64,
    in_flight: Option<u64>,
}

impl BrowseMachine {
    /// Creates a machine that starts on `start_category`.
    ///
    /// Search cannot be a start category; trending is used instead.
    #[must_use]
    pub fn new(start_category: Category) -> Self {
        let start_category = if start_category.is_browsable() {
            start_category
        } else {
            tracing::warn!("search cannot be the start category, using trending");
            Category::Trending
        };
        Self {
            state: BrowseState::initial(start_category),
            start_category,
            generation: 0,
            in_flight: None,
        }
    }

    /// Displayed state.
    #[must_use]
    pub const fn state(&self) -> &BrowseState {
        &self.state
    }

    /// Route of the displayed listing.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::from_state(&self.state)
    }

    /// Whether the latest dispatched fetch is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Initial fetch: first page of the start category.
    pub fn start(&mut self) -> PendingFetch {
        self.issue(PageRequest {
            category: self.start_category,
            term: String::new(),
            page: 1,
        })
    }

    /// Switches to the first page of a browsable category.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::NotBrowsable`] for [`Category::Search`].
    pub fn select_category(&mut self, category: Category) -> Result<PendingFetch, InvalidInput> {
        let request = PageRequest::browse(category, 1)?;
        Ok(self.issue(request))
    }

    /// Searches for `term` (normalized and trimmed), first page.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::EmptySearchTerm`] if nothing remains after
    /// normalization.
    pub fn search(&mut self, term: &str) -> Result<PendingFetch, InvalidInput> {
        let request = PageRequest::search(term, 1)?;
        Ok(self.issue(request))
    }

    /// Jumps to page `page` of the displayed listing.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::PageOutOfRange`] unless `1 <= page <= total_pages`.
    pub fn go_to_page(&mut self, page: u32) -> Result<PendingFetch, InvalidInput> {
        let total_pages = self.state.total_pages;
        if page < 1 || page > total_pages {
            return Err(InvalidInput::PageOutOfRange { page, total_pages });
        }
        let request = self.state.request().with_page(page);
        Ok(self.issue(request))
    }

    /// Next page of the displayed listing.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::PageOutOfRange`] on the last page.
    pub fn next_page(&mut self) -> Result<PendingFetch, InvalidInput> {
        self.go_to_page(self.state.current_page.saturating_add(1))
    }

    /// Previous page of the displayed listing.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::PageOutOfRange`] on the first page.
    pub fn previous_page(&mut self) -> Result<PendingFetch, InvalidInput> {
        self.go_to_page(self.state.current_page.saturating_sub(1))
    }

    /// Restores a list route, e.g. when navigating back.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::NotBrowsable`] for routes that are not lists.
    pub fn navigate(&mut self, route: &Route) -> Result<PendingFetch, InvalidInput> {
        match route {
            Route::Browse(request) if request.page() >= 1 => Ok(self.issue(request.clone())),
            Route::Browse(request) => Err(InvalidInput::PageOutOfRange {
                page: request.page(),
                total_pages: self.state.total_pages,
            }),
            Route::Title { .. } | Route::Trailer { .. } | Route::Watch { .. } | Route::Person { .. } => {
                Err(InvalidInput::NotBrowsable)
            }
        }
    }

    /// Applies a completed fetch.
    ///
    /// Outcomes of anything but the latest dispatched fetch are dropped.
    /// On success the state is replaced by the fetched page. On failure
    /// the requested listing becomes current with no results while the
    /// total page count is kept.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        if self.in_flight != Some(outcome.generation) {
            tracing::debug!(
                generation = outcome.generation,
                latest = self.generation,
                "discarding stale fetch outcome"
            );
            return Applied::Stale;
        }
        self.in_flight = None;

        let PageRequest {
            category,
            term,
            page,
        } = outcome.request;
        match outcome.result {
            Ok(result) => {
                let total_pages = result.total_pages.min(MAX_TOTAL_PAGES);
                self.state = BrowseState {
                    category,
                    search_term: term,
                    current_page: page.min(total_pages.max(1)),
                    total_pages,
                    results: result.items,
                };
                Applied::Replaced
            }
            Err(err) => {
                tracing::warn!(%err, %category, page, "failed to fetch listing");
                let total_pages = self.state.total_pages;
                // Restored routes are not range-checked; keep the page within the kept total.
                let current_page = if total_pages > 0 {
                    page.min(total_pages)
                } else {
                    page
                };
                self.state = BrowseState {
                    category,
                    search_term: term,
                    current_page,
                    total_pages,
                    results: Vec::new(),
                };
                Applied::Failed
            }
        }
    }

    /// Runs `pending` through `fetcher` and applies the outcome.
    pub async fn dispatch<F: LocalCategoryFetcher>(
        &mut self,
        fetcher: &F,
        pending: PendingFetch,
    ) -> Applied {
        let result = fetcher.fetch(pending.request()).await;
        self.apply(pending.complete(result))
    }

    fn issue(&mut self, request: PageRequest) -> PendingFetch {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(self.generation);
        tracing::debug!(
            generation = self.generation,
            category = %request.category,
            page = request.page,
            "dispatching fetch"
        );
        PendingFetch {
            generation: self.generation,
            request,
        }
    }
}
