//! Browser TUI state management.

use cinehub_browse::detail::TitleDetail;
use cinehub_browse::person::PersonProfile;
use cinehub_browse::watch::WatchSession;
use cinehub_browse::{
    Applied, BrowseMachine, Category, FetchOutcome, InvalidInput, PendingFetch, ResultItem, Route,
};
use ratatui::widgets::TableState;

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// Content of the right-hand pane.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPane {
    /// Overview of the highlighted result.
    Preview,
    /// A detail request is in flight.
    Loading(Route),
    /// Title details.
    Title(Box<TitleDetail>),
    /// Person details.
    Person(Box<PersonProfile>),
    /// Watch session.
    Watch(Box<WatchSession>),
    /// The detail request failed.
    Error(String),
}

/// Results delivered to the event loop by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// A listing fetch completed.
    Listing(FetchOutcome),
    /// A detail load completed.
    Detail {
        /// Ticket issued by [`BrowserState::begin_detail`].
        ticket: u64,
        /// Route that was loaded.
        route: Route,
        /// Loaded pane.
        pane: DetailPane,
    },
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Category and pagination state.
    pub machine: BrowseMachine,
    /// Table state for the result list (handles selection and scroll).
    pub table_state: TableState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search text being typed.
    pub search_input: String,
    /// Right-hand pane.
    pub detail: DetailPane,
    /// Highlighted cast member in the title pane.
    pub cast_cursor: usize,
    /// Previously displayed list routes, most recent last.
    history: Vec<Route>,
    /// Ticket of the latest detail request.
    detail_ticket: u64,
}

impl BrowserState {
    /// Creates a state starting on `start_category`.
    #[must_use]
    pub fn new(start_category: Category) -> Self {
        Self {
            machine: BrowseMachine::new(start_category),
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            detail: DetailPane::Preview,
            cast_cursor: 0,
            history: Vec::new(),
            detail_ticket: 0,
        }
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Returns the highlighted result (if any).
    #[must_use]
    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.machine.state().results.get(self.cursor())
    }

    /// Moves cursor up.
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current.saturating_sub(1)));
            self.detail = DetailPane::Preview;
        }
    }

    /// Moves cursor down.
    pub fn move_down(&mut self) {
        let current = self.cursor();
        let next = current.saturating_add(1);
        if next < self.machine.state().results.len() {
            self.table_state.select(Some(next));
            self.detail = DetailPane::Preview;
        }
    }

    /// Runs a list transition, remembering the current route for back
    /// navigation when the transition is accepted.
    pub fn transition(
        &mut self,
        step: impl FnOnce(&mut BrowseMachine) -> Result<PendingFetch, InvalidInput>,
    ) -> Option<PendingFetch> {
        let before = self.machine.route();
        match step(&mut self.machine) {
            Ok(pending) => {
                if self.machine.state().total_pages > 0 && self.history.last() != Some(&before) {
                    self.history.push(before);
                }
                Some(pending)
            }
            Err(err) => {
                tracing::debug!(%err, "transition ignored");
                None
            }
        }
    }

    /// Selects the category after (or before) the displayed one.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn cycle_category(&mut self, forward: bool) -> Option<PendingFetch> {
        let tabs = Category::BROWSABLE;
        let current = self.machine.state().category;
        let index = tabs.iter().position(|c| *c == current).unwrap_or(0);
        let next = if forward {
            index.saturating_add(1) % tabs.len()
        } else {
            index.checked_sub(1).unwrap_or(tabs.len().saturating_sub(1))
        };
        let category = tabs.get(next).copied().unwrap_or_default();
        self.transition(|m| m.select_category(category))
    }

    /// Returns to the previous list route.
    pub fn back(&mut self) -> Option<PendingFetch> {
        let route = self.history.pop()?;
        match self.machine.navigate(&route) {
            Ok(pending) => Some(pending),
            Err(err) => {
                tracing::debug!(%err, %route, "history entry ignored");
                None
            }
        }
    }

    /// Number of remembered list routes.
    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Appends a character to the search input.
    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
    }

    /// Removes the last character from the search input.
    pub fn search_pop(&mut self) {
        self.search_input.pop();
    }

    /// Submits the search input. Blank input leaves search mode without
    /// fetching.
    pub fn submit_search(&mut self) -> Option<PendingFetch> {
        self.input_mode = InputMode::Normal;
        let term = self.search_input.clone();
        self.transition(|m| m.search(&term))
    }

    /// Applies a listing outcome. Resets the cursor when results change
    /// and drops any detail request still in flight.
    pub fn apply_listing(&mut self, outcome: FetchOutcome) -> Applied {
        let applied = self.machine.apply(outcome);
        if applied != Applied::Stale {
            self.detail_ticket = self.detail_ticket.wrapping_add(1);
            let has_rows = !self.machine.state().results.is_empty();
            self.table_state.select(has_rows.then_some(0));
            self.detail = DetailPane::Preview;
        }
        applied
    }

    /// Starts a detail request and returns its ticket.
    pub fn begin_detail(&mut self, route: Route) -> u64 {
        self.detail_ticket = self.detail_ticket.wrapping_add(1);
        self.detail = DetailPane::Loading(route);
        self.cast_cursor = 0;
        self.detail_ticket
    }

    /// Applies a detail result if it answers the latest request.
    /// Returns `false` for superseded results.
    pub fn finish_detail(&mut self, ticket: u64, pane: DetailPane) -> bool {
        if ticket != self.detail_ticket {
            return false;
        }
        self.detail = pane;
        true
    }

    /// Whether a detail request is in flight.
    #[must_use]
    pub const fn is_detail_loading(&self) -> bool {
        matches!(self.detail, DetailPane::Loading(_))
    }

    /// Highlights the next cast member of the title pane.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn next_cast(&mut self) {
        if let DetailPane::Title(detail) = &self.detail
            && !detail.cast.is_empty()
        {
            self.cast_cursor = self.cast_cursor.saturating_add(1) % detail.cast.len();
        }
    }

    /// Route of the highlighted cast member.
    #[must_use]
    pub fn selected_cast_route(&self) -> Option<Route> {
        let DetailPane::Title(detail) = &self.detail else {
            return None;
        };
        detail
            .cast
            .get(self.cast_cursor)
            .map(|c| Route::Person { id: c.person_id })
    }

    /// Route of a view for the highlighted result.
    #[must_use]
    pub fn selected_route(&self, view: SelectedView) -> Option<Route> {
        let item = self.selected_item()?;
        let (media, id) = (item.media_type, item.id);
        Some(match view {
            SelectedView::Title => Route::Title { media, id },
            SelectedView::Trailer => Route::Trailer { media, id },
            SelectedView::Watch => Route::Watch { media, id },
        })
    }

    /// Steps the watch pane to the adjacent season.
    pub fn step_season(&mut self, forward: bool) {
        if let DetailPane::Watch(session) = &mut self.detail {
            let target = step(session.season(), forward);
            session.select_season(target);
        }
    }

    /// Steps the watch pane to the adjacent episode.
    pub fn step_episode(&mut self, forward: bool) {
        if let DetailPane::Watch(session) = &mut self.detail {
            let target = step(session.episode(), forward);
            session.select_episode(target);
        }
    }
}

/// Views reachable from a highlighted result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedView {
    /// Details.
    Title,
    /// Trailer.
    Trailer,
    /// Embedded player.
    Watch,
}

const fn step(value: u32, forward: bool) -> u32 {
    if forward {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    }
}
