//! Title details: metadata, credits, watch providers and trailer.

use anyhow::{Context, Result};
use cinehub_api::embed::{select_trailer, youtube_watch_url};
use cinehub_api::tmdb::{
    ImageSize, MediaKind, TmdbApi, TmdbCredits, TmdbGenre, TmdbProvider, TmdbVideos,
    TmdbWatchProviders, image_url,
};
use tracing::instrument;

use crate::item::parse_year;

/// Number of top-billed cast members kept.
const TOP_CAST: usize = 10;

/// Language and region for detail requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailOptions {
    /// Response language (e.g. "en-US").
    pub language: String,
    /// Watch provider region (ISO 3166-1, e.g. "US").
    pub region: String,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            region: String::from("US"),
        }
    }
}

/// A cast member as shown on the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastEntry {
    /// TMDB person ID.
    pub person_id: u64,
    /// Name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
}

/// Providers offering the title in one region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderSummary {
    /// Region code.
    pub region: String,
    /// TMDB watch page.
    pub link: Option<String>,
    /// Subscription services.
    pub flatrate: Vec<String>,
    /// Rental services.
    pub rent: Vec<String>,
    /// Purchase services.
    pub buy: Vec<String>,
}

impl ProviderSummary {
    /// Whether no provider is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

/// YouTube trailer link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerLink {
    /// Video name.
    pub name: String,
    /// YouTube video key.
    pub key: String,
    /// Watch URL.
    pub url: String,
}

/// Everything the details view shows for a movie or series.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDetail {
    /// Movie or TV.
    pub media: MediaKind,
    /// TMDB ID.
    pub id: u64,
    /// Localized title or name.
    pub title: String,
    /// Original title, when it differs.
    pub original_title: Option<String>,
    /// Tagline (movies).
    pub tagline: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Release or first air date.
    pub release_date: Option<String>,
    /// Runtime in minutes (movies).
    pub runtime_minutes: Option<u32>,
    /// Number of seasons (TV).
    pub season_count: Option<u32>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Poster URL (w342).
    pub poster_url: Option<String>,
    /// IMDb ID (movies).
    pub imdb_id: Option<String>,
    /// Top-billed cast.
    pub cast: Vec<CastEntry>,
    /// Directors.
    pub directors: Vec<String>,
    /// Watch providers in the configured region.
    pub providers: ProviderSummary,
    /// First YouTube trailer.
    pub trailer: Option<TrailerLink>,
}

impl TitleDetail {
    /// Year of the release date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }
}

/// Loads the details view of a title.
///
/// Details, credits, providers and videos are requested concurrently.
/// Only the details request is required; the others degrade to empty
/// sections with a warning.
///
/// # Errors
///
/// Returns an error if the details request fails.
#[instrument(skip_all, fields(%media, id))]
pub async fn load_title_detail<A: TmdbApi + Sync>(
    api: &A,
    media: MediaKind,
    id: u64,
    options: &DetailOptions,
) -> Result<TitleDetail> {
    let language = options.language.as_str();
    let (base, credits, providers, videos) = futures::join!(
        load_base(api, media, id, language),
        api.credits(media, id, language),
        api.watch_providers(media, id),
        api.videos(media, id, language),
    );

    let mut detail = base.with_context(|| format!("failed to load {media} {id}"))?;
    let credits = or_empty(credits, "credits");
    let providers = or_empty(providers, "watch providers");
    let videos = or_empty(videos, "videos");

    if let Some(credits) = credits.as_ref() {
        detail.cast = top_cast(credits);
        detail.directors = directors(credits);
    }
    detail.providers = providers.map_or_else(ProviderSummary::default, |p| {
        summarize_providers(&p, &options.region)
    });
    detail.trailer = videos.as_ref().and_then(trailer_link);
    Ok(detail)
}

async fn load_base<A: TmdbApi + Sync>(
    api: &A,
    media: MediaKind,
    id: u64,
    language: &str,
) -> Result<TitleDetail> {
    let detail = match media {
        MediaKind::Movie => {
            let movie = api.movie_details(id, language).await?;
            TitleDetail {
                media,
                id,
                original_title: movie.original_title.filter(|t| *t != movie.title),
                title: movie.title,
                tagline: movie.tagline.filter(|t| !t.is_empty()),
                overview: movie.overview.filter(|t| !t.is_empty()),
                release_date: movie.release_date.filter(|d| !d.is_empty()),
                runtime_minutes: movie.runtime.filter(|r| *r > 0),
                season_count: None,
                genres: genre_names(movie.genres),
                vote_average: movie.vote_average,
                poster_url: image_url(ImageSize::W342, movie.poster_path.as_deref()),
                imdb_id: movie.imdb_id.filter(|i| !i.is_empty()),
                cast: Vec::new(),
                directors: Vec::new(),
                providers: ProviderSummary::default(),
                trailer: None,
            }
        }
        MediaKind::Tv => {
            let tv = api.tv_details(id, language).await?;
            TitleDetail {
                media,
                id,
                original_title: tv.original_name.filter(|n| *n != tv.name),
                title: tv.name,
                tagline: None,
                overview: tv.overview.filter(|t| !t.is_empty()),
                release_date: tv.first_air_date.filter(|d| !d.is_empty()),
                runtime_minutes: None,
                season_count: Some(tv.number_of_seasons),
                genres: genre_names(tv.genres),
                vote_average: tv.vote_average,
                poster_url: image_url(ImageSize::W342, tv.poster_path.as_deref()),
                imdb_id: None,
                cast: Vec::new(),
                directors: Vec::new(),
                providers: ProviderSummary::default(),
                trailer: None,
            }
        }
    };
    Ok(detail)
}

fn or_empty<T>(result: Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(err = %format!("{err:#}"), "failed to load {what}");
            None
        }
    }
}

fn genre_names(genres: Vec<TmdbGenre>) -> Vec<String> {
    genres.into_iter().map(|g| g.name).collect()
}

fn top_cast(credits: &TmdbCredits) -> Vec<CastEntry> {
    let mut cast: Vec<_> = credits.cast.iter().collect();
    cast.sort_by_key(|c| c.order.unwrap_or(u32::MAX));
    cast.into_iter()
        .take(TOP_CAST)
        .map(|c| CastEntry {
            person_id: c.id,
            name: c.name.clone(),
            character: c.character.clone().filter(|s| !s.is_empty()),
        })
        .collect()
}

fn directors(credits: &TmdbCredits) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for member in credits
        .crew
        .iter()
        .filter(|c| c.job.as_deref() == Some("Director"))
    {
        if !names.contains(&member.name) {
            names.push(member.name.clone());
        }
    }
    names
}

/// Provider names available in `region`.
#[must_use]
pub fn summarize_providers(providers: &TmdbWatchProviders, region: &str) -> ProviderSummary {
    let Some(entry) = providers.results.get(region) else {
        return ProviderSummary {
            region: region.to_owned(),
            ..ProviderSummary::default()
        };
    };
    let names = |list: &[TmdbProvider]| -> Vec<String> {
        list.iter().map(|p| p.provider_name.clone()).collect()
    };
    ProviderSummary {
        region: region.to_owned(),
        link: entry.link.clone(),
        flatrate: names(&entry.flatrate),
        rent: names(&entry.rent),
        buy: names(&entry.buy),
    }
}

fn trailer_link(videos: &TmdbVideos) -> Option<TrailerLink> {
    let video = select_trailer(&videos.results)?;
    let url = match youtube_watch_url(&video.key) {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::warn!(err = %format!("{err:#}"), "failed to build trailer URL");
            return None;
        }
    };
    Some(TrailerLink {
        name: video.name.clone(),
        key: video.key.clone(),
        url,
    })
}
