//! cinehub - movie and TV discovery CLI.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path, resolve_log_dir};
use crate::tui::{BrowserSettings, run_browser};
use cinehub_api::embed::{select_trailer, youtube_watch_url};
use cinehub_api::tmdb::{LocalTmdbApi, MediaKind, TmdbClient};
use cinehub_browse::detail::{TitleDetail, load_title_detail};
use cinehub_browse::person::{PersonProfile, load_person};
use cinehub_browse::watch::WatchSession;
use cinehub_browse::{
    BrowseMachine, BrowseState, Category, EMPTY_RESULTS_MESSAGE, PageEntry, PageRequest, Route,
    TmdbCategoryFetcher,
};

/// Log file name prefix inside the log directory.
const LOG_FILE_PREFIX: &str = "cinehub.log";

/// Top-level CLI.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse listings interactively via TUI.
    Browse,
    /// Print one page of a category listing.
    List(ListArgs),
    /// Search movies and TV shows.
    Search(SearchArgs),
    /// Show details of a movie or TV show.
    Title(TitleArgs),
    /// Show a person and their best-known titles.
    Person(PersonArgs),
    /// Print the trailer URL of a movie or TV show.
    Trailer(TrailerArgs),
    /// Print the embedded player URL of a movie or TV episode.
    Watch(WatchArgs),
    /// Resolve a route path (e.g. "/search?q=batman&page=2") and show it.
    Route(RouteArgs),
    /// Manage the configuration file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Listing categories accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ListCategory {
    /// Weekly trending movies and TV.
    Trending,
    /// Popular movies.
    Movies,
    /// Popular TV shows.
    Tv,
    /// Popular Japanese animation.
    Anime,
}

impl From<ListCategory> for Category {
    fn from(value: ListCategory) -> Self {
        match value {
            ListCategory::Trending => Self::Trending,
            ListCategory::Movies => Self::Movies,
            ListCategory::Tv => Self::Tv,
            ListCategory::Anime => Self::Anime,
        }
    }
}

/// Media kinds accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum MediaArg {
    /// Movie.
    Movie,
    /// TV show.
    Tv,
}

impl From<MediaArg> for MediaKind {
    fn from(value: MediaArg) -> Self {
        match value {
            MediaArg::Movie => Self::Movie,
            MediaArg::Tv => Self::Tv,
        }
    }
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Category to list.
    #[arg(value_enum)]
    category: ListCategory,

    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search term.
    term: String,

    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `title` subcommand.
#[derive(clap::Args)]
struct TitleArgs {
    /// Movie or TV show.
    #[arg(value_enum)]
    media: MediaArg,

    /// TMDB ID.
    id: u64,
}

/// Arguments for the `person` subcommand.
#[derive(clap::Args)]
struct PersonArgs {
    /// TMDB person ID.
    id: u64,
}

/// Arguments for the `trailer` subcommand.
#[derive(clap::Args)]
struct TrailerArgs {
    /// Movie or TV show.
    #[arg(value_enum)]
    media: MediaArg,

    /// TMDB ID.
    id: u64,

    /// Open the trailer in the default browser.
    #[arg(long)]
    open: bool,
}

/// Arguments for the `watch` subcommand.
#[derive(clap::Args)]
struct WatchArgs {
    /// Movie or TV show.
    #[arg(value_enum)]
    media: MediaArg,

    /// TMDB ID.
    id: u64,

    /// Season number (TV only, default: 1).
    #[arg(long)]
    season: Option<u32>,

    /// Episode number (TV only, default: first of the season).
    #[arg(long)]
    episode: Option<u32>,

    /// Open the player in the default browser.
    #[arg(long)]
    open: bool,
}

/// Arguments for the `route` subcommand.
#[derive(clap::Args)]
struct RouteArgs {
    /// Route path.
    path: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default values (keeps an existing file).
    Init,
    /// Print the effective configuration.
    Show,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Loads the configuration for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Creates a TMDB client from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(base_url) = config.tmdb_base_url()? {
        builder = builder.base_url(base_url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Creates the category fetcher used by listings.
fn build_fetcher(config: &AppConfig) -> Result<TmdbCategoryFetcher<TmdbClient>> {
    let client = build_tmdb_client(config)?;
    Ok(TmdbCategoryFetcher::new(
        client,
        config.tmdb.language.clone(),
    ))
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let settings = BrowserSettings {
        start_category: config.browse.start_category,
        detail: config.detail_options(),
        embed_base: config.embed_base_url()?,
    };
    let fetcher = Arc::new(build_fetcher(&config)?);
    run_browser(fetcher, settings).await
}

/// Fetches and prints one page of a listing.
///
/// A failed fetch prints the empty view, as the browser does.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_listing(request: PageRequest, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let fetcher = build_fetcher(&config)?;

    let mut machine = BrowseMachine::new(config.browse.start_category);
    let pending = machine
        .navigate(&Route::Browse(request))
        .context("route is not a listing")?;
    let applied = machine.dispatch(&fetcher, pending).await;
    tracing::debug!(?applied, "listing fetched");

    print_listing(machine.state());
    Ok(())
}

/// Prints a listing: header, rows, pagination bar.
fn print_listing(state: &BrowseState) {
    let heading = if state.category == Category::Search {
        format!("Search \"{}\"", state.search_term)
    } else {
        String::from(state.category.label())
    };
    tracing::info!(
        "{heading} - page {}/{}",
        state.current_page,
        state.total_pages
    );

    if state.is_empty() {
        tracing::info!("{EMPTY_RESULTS_MESSAGE}");
        return;
    }

    tracing::info!("ID\tType\tYear\tRating\tTitle");
    for item in &state.results {
        tracing::info!(
            "{}\t{}\t{}\t{:.1}\t{}",
            item.id,
            item.media_type,
            item.release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            item.vote_average,
            item.display_title,
        );
    }
    tracing::info!("Pages: {}", format_pagination(&state.pagination(), state.current_page));
    tracing::info!("Route: {}", Route::from_state(state));
}

/// Formats pagination entries, bracketing the current page.
fn format_pagination(entries: &[PageEntry], current: u32) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            PageEntry::Page(page) if *page == current => format!("[{page}]"),
            PageEntry::Page(page) => page.to_string(),
            PageEntry::Ellipsis => String::from("…"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the `title` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the title cannot be loaded.
#[instrument(skip_all)]
async fn run_title(media: MediaKind, id: u64, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let detail = load_title_detail(&client, media, id, &config.detail_options()).await?;
    print_title(&detail);
    Ok(())
}

fn print_title(detail: &TitleDetail) {
    let year = detail
        .release_year()
        .map_or_else(String::new, |y| format!(" ({y})"));
    tracing::info!("{}{year}", detail.title);
    if let Some(tagline) = &detail.tagline {
        tracing::info!("  {tagline}");
    }
    if let Some(original) = &detail.original_title {
        tracing::info!("Original:  {original}");
    }
    if let Some(runtime) = detail.runtime_minutes {
        tracing::info!("Runtime:   {runtime} min");
    }
    if let Some(seasons) = detail.season_count {
        tracing::info!("Seasons:   {seasons}");
    }
    if !detail.genres.is_empty() {
        tracing::info!("Genres:    {}", detail.genres.join(", "));
    }
    tracing::info!("Rating:    {:.1}", detail.vote_average);
    if !detail.directors.is_empty() {
        tracing::info!("Directed:  {}", detail.directors.join(", "));
    }
    if let Some(imdb_id) = &detail.imdb_id {
        tracing::info!("IMDb:      {imdb_id}");
    }
    if let Some(poster) = &detail.poster_url {
        tracing::info!("Poster:    {poster}");
    }
    if let Some(overview) = &detail.overview {
        tracing::info!("{overview}");
    }
    if !detail.cast.is_empty() {
        tracing::info!("PersonID\tName\tCharacter");
        for member in &detail.cast {
            tracing::info!(
                "{}\t{}\t{}",
                member.person_id,
                member.name,
                member.character.as_deref().unwrap_or("-"),
            );
        }
    }
    let providers = &detail.providers;
    if !providers.is_empty() {
        tracing::info!("Where to watch ({}):", providers.region);
        tracing::info!("  Stream: {}", providers.flatrate.join(", "));
        tracing::info!("  Rent:   {}", providers.rent.join(", "));
        tracing::info!("  Buy:    {}", providers.buy.join(", "));
    }
    if let Some(trailer) = &detail.trailer {
        tracing::info!("Trailer:   {}", trailer.url);
    }
}

/// Runs the `person` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the person cannot be loaded.
#[instrument(skip_all)]
async fn run_person(id: u64, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let person = load_person(&client, id, &config.tmdb.language).await?;
    print_person(&person);
    Ok(())
}

fn print_person(person: &PersonProfile) {
    tracing::info!("{}", person.name);
    if let Some(department) = &person.known_for_department {
        tracing::info!("Known for: {department}");
    }
    match (&person.birthday, &person.place_of_birth) {
        (Some(birthday), Some(place)) => tracing::info!("Born:      {birthday} in {place}"),
        (Some(birthday), None) => tracing::info!("Born:      {birthday}"),
        _ => {}
    }
    if let Some(biography) = &person.biography {
        tracing::info!("{biography}");
    }
    if !person.filmography.is_empty() {
        tracing::info!("Year\tType\tRoute\tTitle");
        for entry in &person.filmography {
            tracing::info!(
                "{}\t{}\t{}\t{}",
                entry
                    .year
                    .map_or_else(|| String::from("-"), |y| y.to_string()),
                entry.media,
                entry.route(),
                entry.title,
            );
        }
    }
}

/// Runs the `trailer` subcommand.
///
/// # Errors
///
/// Returns an error if the videos cannot be loaded or no trailer exists.
#[instrument(skip_all)]
async fn run_trailer(media: MediaKind, id: u64, open: bool, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let videos = client
        .videos(media, id, &config.tmdb.language)
        .await
        .with_context(|| format!("failed to load videos of {media} {id}"))?;
    let Some(trailer) = select_trailer(&videos.results) else {
        bail!("no YouTube trailer for {media} {id}");
    };
    let url = youtube_watch_url(&trailer.key)?;

    tracing::info!("{}: {url}", trailer.name);
    if open {
        open::that(url.as_str()).with_context(|| format!("failed to open {url}"))?;
    }
    Ok(())
}

/// Options for the `watch` subcommand.
struct WatchSelection {
    season: Option<u32>,
    episode: Option<u32>,
    open: bool,
}

/// Runs the `watch` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be loaded or the selection is unknown.
#[instrument(skip_all)]
async fn run_watch(
    media: MediaKind,
    id: u64,
    selection: WatchSelection,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let config = load_config(dir)?;
    let base = config.embed_base_url()?;

    let mut session = if media == MediaKind::Movie {
        WatchSession::movie(id)
    } else {
        let client = build_tmdb_client(&config)?;
        WatchSession::load(&client, media, id, &config.tmdb.language).await?
    };

    if media == MediaKind::Tv {
        if let Some(season) = selection.season
            && !session.select_season(season)
        {
            bail!("season {season} not found for tv {id}");
        }
        if let Some(episode) = selection.episode
            && !session.select_episode(episode)
        {
            bail!(
                "episode {episode} not found in season {} of tv {id}",
                session.season()
            );
        }
        if let Some(title) = session.title() {
            tracing::info!("{title} S{:02}E{:02}", session.season(), session.episode());
        }
    }

    let url = session.embed_url(&base)?;
    tracing::info!("{url}");
    if selection.open {
        open::that(url.as_str()).with_context(|| format!("failed to open {url}"))?;
    }
    Ok(())
}

/// Runs the `route` subcommand.
///
/// # Errors
///
/// Returns an error if the route is invalid or its view fails.
async fn run_route(path: &str, dir: Option<&PathBuf>) -> Result<()> {
    let route = Route::parse(path).with_context(|| format!("invalid route: {path}"))?;
    tracing::debug!(%route, "resolved route");
    match route {
        Route::Browse(request) => run_listing(request, dir).await,
        Route::Title { media, id } => run_title(media, id, dir).await,
        Route::Trailer { media, id } => run_trailer(media, id, false, dir).await,
        Route::Watch { media, id } => {
            let selection = WatchSelection {
                season: None,
                episode: None,
                open: false,
            };
            run_watch(media, id, selection, dir).await
        }
        Route::Person { id } => run_person(id, dir).await,
    }
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or written.
fn run_config_init(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() {
        tracing::info!("Config already exists: {}", path.display());
        return Ok(());
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;
    let content = toml::to_string_pretty(&config).context("failed to serialize config to TOML")?;
    tracing::info!("# {}", path.display());
    for line in content.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Initializes tracing.
///
/// With `log_dir`, output goes to a daily log file instead of the
/// terminal; the returned guard flushes it on drop.
fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let console_layer = log_dir
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_target(false));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer);

    #[cfg(not(feature = "otel"))]
    registry.init();

    #[cfg(feature = "otel")]
    {
        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        registry.with(otel_layer).init();
    }

    Ok(guard)
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file.
    let log_dir = match cli.command {
        Commands::Browse => Some(resolve_log_dir(cli.dir.as_ref())?),
        _ => None,
    };
    let _guard = init_tracing(log_dir.as_deref())?;

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Browse => run_browse(dir).await,
        Commands::List(args) => {
            let request = PageRequest::browse(args.category.into(), args.page)?;
            run_listing(request, dir).await
        }
        Commands::Search(args) => {
            let request = PageRequest::search(&args.term, args.page)?;
            run_listing(request, dir).await
        }
        Commands::Title(args) => run_title(args.media.into(), args.id, dir).await,
        Commands::Person(args) => run_person(args.id, dir).await,
        Commands::Trailer(args) => run_trailer(args.media.into(), args.id, args.open, dir).await,
        Commands::Watch(args) => {
            let selection = WatchSelection {
                season: args.season,
                episode: args.episode,
                open: args.open,
            };
            run_watch(args.media.into(), args.id, selection, dir).await
        }
        Commands::Route(args) => run_route(&args.path, dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init => run_config_init(dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "cinehub", &mut io::stdout());
            Ok(())
        }
    }
}
