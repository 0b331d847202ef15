//! Browser TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cinehub_api::tmdb::{TmdbApi, TmdbClient};
use cinehub_browse::detail::{DetailOptions, load_title_detail};
use cinehub_browse::person::load_person;
use cinehub_browse::watch::WatchSession;
use cinehub_browse::{BrowseMachine, Category, CategoryFetcher, PendingFetch, Route, TmdbCategoryFetcher};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use url::Url;

use super::state::{AppMessage, BrowserState, DetailPane, InputMode, SelectedView};
use super::ui;

/// How long the loop waits for background results between key polls.
const TICK: Duration = Duration::from_millis(50);

/// Settings for [`run_browser`].
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserSettings {
    /// Category shown first.
    pub start_category: Category,
    /// Language and region for detail views.
    pub detail: DetailOptions,
    /// Embedded player base URL.
    pub embed_base: Url,
}

/// Outcome of a key press.
#[derive(Debug)]
enum Action {
    None,
    Quit,
    Fetch(PendingFetch),
    Load(Route),
    Open(String),
}

/// Handles shared with background tasks.
struct Shared {
    fetcher: Arc<TmdbCategoryFetcher<TmdbClient>>,
    settings: BrowserSettings,
    tx: mpsc::UnboundedSender<AppMessage>,
}

/// Runs the browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser(
    fetcher: Arc<TmdbCategoryFetcher<TmdbClient>>,
    settings: BrowserSettings,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctx = Shared {
        fetcher,
        settings,
        tx,
    };

    let mut state = BrowserState::new(ctx.settings.start_category);
    let pending = state.machine.start();
    spawn_fetch(&ctx, pending);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &ctx, &mut rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    ctx: &Shared,
    rx: &mut mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        if let Ok(Some(message)) = tokio::time::timeout(TICK, rx.recv()).await {
            handle_message(state, message);
            while let Ok(message) = rx.try_recv() {
                handle_message(state, message);
            }
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            let Event::Key(key) = event::read().context("failed to read event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = match state.input_mode {
                InputMode::Search => handle_search_input(state, key.code),
                InputMode::Normal => {
                    handle_normal_input(state, key.code, key.modifiers, &ctx.settings.embed_base)
                }
            };
            match action {
                Action::None => {}
                Action::Quit => return Ok(()),
                Action::Fetch(pending) => spawn_fetch(ctx, pending),
                Action::Load(route) => {
                    let ticket = state.begin_detail(route.clone());
                    spawn_detail(ctx, ticket, route);
                }
                Action::Open(url) => open_external(&url),
            }
        }
    }
}

/// Applies a background result to the state.
fn handle_message(state: &mut BrowserState, message: AppMessage) {
    match message {
        AppMessage::Listing(outcome) => {
            let generation = outcome.generation();
            let applied = state.apply_listing(outcome);
            tracing::debug!(generation, ?applied, "listing outcome");
        }
        AppMessage::Detail {
            ticket,
            route,
            pane,
        } => {
            if !state.finish_detail(ticket, pane) {
                tracing::debug!(ticket, %route, "superseded detail dropped");
                return;
            }
            if matches!(route, Route::Trailer { .. })
                && let DetailPane::Title(detail) = &state.detail
            {
                match &detail.trailer {
                    Some(trailer) => open_external(&trailer.url),
                    None => tracing::info!(%route, "no trailer available"),
                }
            }
        }
    }
}

/// Handles key input in search mode.
fn handle_search_input(state: &mut BrowserState, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => return fetch(state.submit_search()),
        KeyCode::Backspace => state.search_pop(),
        KeyCode::Char(c) => state.search_push(c),
        _ => {}
    }
    Action::None
}

/// Handles key input in normal mode.
fn handle_normal_input(
    state: &mut BrowserState,
    key: KeyCode,
    modifiers: KeyModifiers,
    embed_base: &Url,
) -> Action {
    match key {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        KeyCode::Tab => return fetch(state.cycle_category(true)),
        KeyCode::BackTab => return fetch(state.cycle_category(false)),
        KeyCode::Char(c @ '1'..='4') => {
            let category = c
                .to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .and_then(|d| d.checked_sub(1))
                .and_then(|i| Category::BROWSABLE.get(i).copied());
            if let Some(category) = category {
                return fetch(state.transition(|m| m.select_category(category)));
            }
        }
        KeyCode::Char('/') => {
            state.search_input = state.machine.state().search_term.clone();
            state.input_mode = InputMode::Search;
        }
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Right | KeyCode::Char('n') => return fetch(state.transition(BrowseMachine::next_page)),
        KeyCode::Left | KeyCode::Char('p') => {
            return fetch(state.transition(BrowseMachine::previous_page));
        }
        KeyCode::Home | KeyCode::Char('g') => return fetch(state.transition(|m| m.go_to_page(1))),
        KeyCode::End | KeyCode::Char('G') => {
            let last = state.machine.state().total_pages;
            return fetch(state.transition(|m| m.go_to_page(last)));
        }
        KeyCode::Enter => return load(state.selected_route(SelectedView::Title)),
        KeyCode::Char('t') => return load(state.selected_route(SelectedView::Trailer)),
        KeyCode::Char('w') => return load(state.selected_route(SelectedView::Watch)),
        KeyCode::Char('c') => state.next_cast(),
        KeyCode::Char('i') => return load(state.selected_cast_route()),
        KeyCode::Char('[') => state.step_season(false),
        KeyCode::Char(']') => state.step_season(true),
        KeyCode::Char(',') => state.step_episode(false),
        KeyCode::Char('.') => state.step_episode(true),
        KeyCode::Char('o') => {
            if let Some(url) = open_target(state, embed_base) {
                return Action::Open(url);
            }
        }
        KeyCode::Esc | KeyCode::Backspace => {
            if state.detail == DetailPane::Preview {
                return fetch(state.back());
            }
            state.detail = DetailPane::Preview;
        }
        _ => {}
    }
    Action::None
}

fn fetch(pending: Option<PendingFetch>) -> Action {
    pending.map_or(Action::None, Action::Fetch)
}

fn load(route: Option<Route>) -> Action {
    route.map_or(Action::None, Action::Load)
}

/// URL opened by `o` for the current pane.
fn open_target(state: &BrowserState, embed_base: &Url) -> Option<String> {
    match &state.detail {
        DetailPane::Watch(session) => match session.embed_url(embed_base) {
            Ok(url) => Some(String::from(url)),
            Err(err) => {
                tracing::warn!(err = %format!("{err:#}"), "failed to build embed URL");
                None
            }
        },
        DetailPane::Title(detail) => detail.trailer.as_ref().map(|t| t.url.clone()),
        DetailPane::Preview
        | DetailPane::Loading(_)
        | DetailPane::Person(_)
        | DetailPane::Error(_) => None,
    }
}

fn open_external(url: &str) {
    tracing::info!(url, "opening in browser");
    if let Err(err) = open::that(url) {
        tracing::warn!(%err, url, "failed to open browser");
    }
}

fn spawn_fetch(ctx: &Shared, pending: PendingFetch) {
    let fetcher = Arc::clone(&ctx.fetcher);
    let tx = ctx.tx.clone();
    tokio::spawn(async move {
        let result = fetcher.fetch(pending.request()).await;
        if tx.send(AppMessage::Listing(pending.complete(result))).is_err() {
            tracing::debug!("browser closed before listing arrived");
        }
    });
}

fn spawn_detail(ctx: &Shared, ticket: u64, route: Route) {
    let fetcher = Arc::clone(&ctx.fetcher);
    let options = ctx.settings.detail.clone();
    let tx = ctx.tx.clone();
    tokio::spawn(async move {
        let pane = load_pane(fetcher.api(), &route, &options).await;
        if tx
            .send(AppMessage::Detail {
                ticket,
                route,
                pane,
            })
            .is_err()
        {
            tracing::debug!("browser closed before detail arrived");
        }
    });
}

/// Loads the pane for a non-list route.
async fn load_pane<A: TmdbApi + Sync>(api: &A, route: &Route, options: &DetailOptions) -> DetailPane {
    let result = match *route {
        Route::Title { media, id } | Route::Trailer { media, id } => {
            load_title_detail(api, media, id, options)
                .await
                .map(|detail| DetailPane::Title(Box::new(detail)))
        }
        Route::Watch { media, id } => WatchSession::load(api, media, id, &options.language)
            .await
            .map(|session| DetailPane::Watch(Box::new(session))),
        Route::Person { id } => load_person(api, id, &options.language)
            .await
            .map(|person| DetailPane::Person(Box::new(person))),
        Route::Browse(_) => return DetailPane::Preview,
    };
    result.unwrap_or_else(|err| {
        tracing::warn!(err = %format!("{err:#}"), %route, "failed to load details");
        DetailPane::Error(format!("{err:#}"))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use cinehub_api::tmdb::MediaKind;
    use cinehub_browse::{ResultItem, ResultPage};

    use super::*;

    fn base() -> Url {
        Url::parse("https://vidsrc.xyz/embed/").unwrap()
    }

    fn loaded() -> BrowserState {
        let mut state = BrowserState::new(Category::Trending);
        let pending = state.machine.start();
        state.apply_listing(pending.complete(Ok(ResultPage {
            items: vec![ResultItem {
                id: 272,
                display_title: String::from("Batman Begins"),
                media_type: MediaKind::Movie,
                release_date: None,
                poster_url: None,
                overview: None,
                vote_average: 7.7,
            }],
            total_pages: 3,
        })));
        state
    }

    fn press(state: &mut BrowserState, key: KeyCode) -> Action {
        match state.input_mode {
            InputMode::Search => handle_search_input(state, key),
            InputMode::Normal => handle_normal_input(state, key, KeyModifiers::NONE, &base()),
        }
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut state = loaded();

        // Act & Assert
        assert!(matches!(press(&mut state, KeyCode::Char('q')), Action::Quit));
        assert!(matches!(
            handle_normal_input(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL, &base()),
            Action::Quit
        ));
    }

    #[test]
    fn test_next_page_fetches() {
        // Arrange
        let mut state = loaded();

        // Act
        let action = press(&mut state, KeyCode::Char('n'));

        // Assert
        let Action::Fetch(pending) = action else {
            panic!("expected fetch, got {action:?}");
        };
        assert_eq!(pending.request().page(), 2);
    }

    #[test]
    fn test_number_key_selects_category() {
        // Arrange
        let mut state = loaded();

        // Act
        let action = press(&mut state, KeyCode::Char('4'));

        // Assert
        let Action::Fetch(pending) = action else {
            panic!("expected fetch, got {action:?}");
        };
        assert_eq!(pending.request().category(), Category::Anime);
    }

    #[test]
    fn test_search_flow() {
        // Arrange
        let mut state = loaded();

        // Act
        press(&mut state, KeyCode::Char('/'));
        for c in "batman".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        let action = press(&mut state, KeyCode::Enter);

        // Assert
        let Action::Fetch(pending) = action else {
            panic!("expected fetch, got {action:?}");
        };
        assert_eq!(pending.request().category(), Category::Search);
        assert_eq!(pending.request().term(), "batman");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_search_keys_do_not_navigate() {
        // Arrange
        let mut state = loaded();
        press(&mut state, KeyCode::Char('/'));

        // Act
        let action = press(&mut state, KeyCode::Char('q'));

        // Assert
        assert!(matches!(action, Action::None));
        assert_eq!(state.search_input, "q");
    }

    #[test]
    fn test_enter_loads_title() {
        // Arrange
        let mut state = loaded();

        // Act
        let action = press(&mut state, KeyCode::Enter);

        // Assert
        let Action::Load(route) = action else {
            panic!("expected load, got {action:?}");
        };
        assert_eq!(route.to_string(), "/movie/272");
    }

    #[test]
    fn test_open_on_movie_watch_pane() {
        // Arrange
        let mut state = loaded();
        let ticket = state.begin_detail(Route::Watch {
            media: MediaKind::Movie,
            id: 272,
        });
        state.finish_detail(ticket, DetailPane::Watch(Box::new(WatchSession::movie(272))));

        // Act
        let action = press(&mut state, KeyCode::Char('o'));

        // Assert
        let Action::Open(url) = action else {
            panic!("expected open, got {action:?}");
        };
        assert_eq!(url, "https://vidsrc.xyz/embed/movie/272");
    }

    #[test]
    fn test_escape_closes_detail_before_going_back() {
        // Arrange
        let mut state = loaded();
        state.begin_detail(Route::Person { id: 3894 });

        // Act
        let first = press(&mut state, KeyCode::Esc);

        // Assert
        assert!(matches!(first, Action::None));
        assert_eq!(state.detail, DetailPane::Preview);
    }

    #[test]
    fn test_trailer_detail_is_dropped_when_superseded() {
        // Arrange
        let mut state = loaded();
        let stale = state.begin_detail(Route::Trailer {
            media: MediaKind::Movie,
            id: 1,
        });
        state.begin_detail(Route::Person { id: 3894 });

        // Act
        handle_message(&mut state, AppMessage::Detail {
            ticket: stale,
            route: Route::Trailer {
                media: MediaKind::Movie,
                id: 1,
            },
            pane: DetailPane::Error(String::from("late")),
        });

        // Assert
        assert!(state.is_detail_loading());
    }
}
