//! TMDB API response types.

use serde::Deserialize;

// --- Paged lists ---

/// A page of results from any paginated TMDB list endpoint
/// (`trending`, `movie/popular`, `tv/popular`, `discover/tv`, `search/multi`).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number.
    pub page: u32,
    /// Results on this page.
    pub results: Vec<T>,
    /// Total number of pages reported upstream.
    pub total_pages: u32,
    /// Total number of results reported upstream.
    pub total_results: u32,
}

/// A single list entry.
///
/// Movie entries carry `title`/`release_date`, TV entries carry
/// `name`/`first_air_date`. Mixed endpoints add `media_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMediaItem {
    /// TMDB ID.
    pub id: u64,
    /// `movie`, `tv` or `person` (mixed endpoints only).
    #[serde(default)]
    pub media_type: Option<String>,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// TV series or person name.
    #[serde(default)]
    pub name: Option<String>,
    /// Movie release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// TV first air date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
}

// --- Details ---

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// IMDb ID (e.g. "tt0372784").
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response from `tv/{series_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// First air date.
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Last air date.
    #[serde(default)]
    pub last_air_date: Option<String>,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Total number of seasons.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Season summaries.
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
    /// Status (e.g. "Returning Series", "Ended").
    #[serde(default)]
    pub status: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Season summary within TV details.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeasonSummary {
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Number of episodes in this season.
    #[serde(default)]
    pub episode_count: u32,
    /// Season name.
    pub name: String,
    /// Air date of this season.
    #[serde(default)]
    pub air_date: Option<String>,
}

/// Response from `tv/{series_id}/season/{season_number}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvSeason {
    /// TMDB season ID.
    pub id: u64,
    /// Season number.
    pub season_number: u32,
    /// Season name.
    #[serde(default)]
    pub name: Option<String>,
    /// Air date.
    #[serde(default)]
    pub air_date: Option<String>,
    /// Episodes in this season.
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

/// A single episode within a season.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbEpisode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Episode name.
    pub name: String,
    /// Air date.
    #[serde(default)]
    pub air_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
}

/// Response from `tv/{series_id}/external_ids`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbExternalIds {
    /// TMDB ID.
    pub id: u64,
    /// IMDb ID (null or empty when unknown).
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// TVDB ID.
    #[serde(default)]
    pub tvdb_id: Option<u64>,
}

// --- Credits ---

/// Response from `{movie,tv}/{id}/credits`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    /// Cast members in billing order.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job (e.g. "Director").
    #[serde(default)]
    pub job: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
}

// --- Watch providers ---

/// Response from `{movie,tv}/{id}/watch/providers`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbWatchProviders {
    /// TMDB ID.
    pub id: u64,
    /// Providers keyed by ISO 3166-1 region code.
    #[serde(default)]
    pub results: std::collections::HashMap<String, TmdbRegionProviders>,
}

/// Providers available in one region.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbRegionProviders {
    /// TMDB watch page link.
    #[serde(default)]
    pub link: Option<String>,
    /// Subscription providers.
    #[serde(default)]
    pub flatrate: Vec<TmdbProvider>,
    /// Rental providers.
    #[serde(default)]
    pub rent: Vec<TmdbProvider>,
    /// Purchase providers.
    #[serde(default)]
    pub buy: Vec<TmdbProvider>,
}

/// A single watch provider.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProvider {
    /// Provider ID.
    pub provider_id: u64,
    /// Provider name.
    pub provider_name: String,
    /// Logo image path.
    #[serde(default)]
    pub logo_path: Option<String>,
}

// --- Videos ---

/// Response from `{movie,tv}/{id}/videos`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideos {
    /// TMDB ID.
    pub id: u64,
    /// Videos.
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// A video entry (trailer, teaser, clip...).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video name.
    pub name: String,
    /// Site-specific key (YouTube video ID).
    pub key: String,
    /// Hosting site (e.g. "YouTube").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether this is an official video.
    #[serde(default)]
    pub official: bool,
}

// --- People ---

/// Response from `person/{person_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPerson {
    /// Person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Biography.
    #[serde(default)]
    pub biography: Option<String>,
    /// Birthday (YYYY-MM-DD).
    #[serde(default)]
    pub birthday: Option<String>,
    /// Place of birth.
    #[serde(default)]
    pub place_of_birth: Option<String>,
    /// Known-for department (e.g. "Acting").
    #[serde(default)]
    pub known_for_department: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response from `person/{person_id}/combined_credits`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCombinedCredits {
    /// Acting credits across movies and TV.
    #[serde(default)]
    pub cast: Vec<TmdbPersonCredit>,
}

/// A single credit within a person's combined credits.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonCredit {
    /// Movie or TV ID.
    pub id: u64,
    /// `movie` or `tv`.
    pub media_type: String,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// TV name.
    #[serde(default)]
    pub name: Option<String>,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Movie release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// TV first air date.
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}
