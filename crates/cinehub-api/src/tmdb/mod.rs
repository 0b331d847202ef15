//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints and retrieves list
//! pages, title details, credits, watch providers, videos and people.

mod api;
mod client;
mod image;
mod params;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use image::{IMAGE_BASE_URL, ImageSize, image_url};
pub use params::{ANIMATION_GENRE_ID, DiscoverTvParams, ListParams, MediaKind, SearchMultiParams};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbCastMember, TmdbCombinedCredits, TmdbCredits, TmdbCrewMember, TmdbEpisode,
    TmdbErrorResponse, TmdbExternalIds, TmdbGenre, TmdbMediaItem, TmdbMovieDetails, TmdbPage,
    TmdbPerson, TmdbPersonCredit, TmdbProvider, TmdbRegionProviders, TmdbSeasonSummary,
    TmdbTvDetails, TmdbTvSeason, TmdbVideo, TmdbVideos, TmdbWatchProviders,
};
