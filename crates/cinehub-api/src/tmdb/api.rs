//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{DiscoverTvParams, ListParams, MediaKind, SearchMultiParams};
use super::types::{
    TmdbCombinedCredits, TmdbCredits, TmdbExternalIds, TmdbMediaItem, TmdbMovieDetails, TmdbPage,
    TmdbPerson, TmdbTvDetails, TmdbTvSeason, TmdbVideos, TmdbWatchProviders,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implementors that run on spawned tasks implement `TmdbApi` directly.
///
/// All methods return an error if the HTTP request fails, the server
/// answers with a non-success status, or the JSON body does not decode.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches `trending/all/week`.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn trending(&self, params: &ListParams) -> Result<TmdbPage<TmdbMediaItem>>;

    /// Fetches `movie/popular`.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn popular_movies(&self, params: &ListParams) -> Result<TmdbPage<TmdbMediaItem>>;

    /// Fetches `tv/popular`.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn popular_tv(&self, params: &ListParams) -> Result<TmdbPage<TmdbMediaItem>>;

    /// Fetches `discover/tv`.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn discover_tv(&self, params: &DiscoverTvParams) -> Result<TmdbPage<TmdbMediaItem>>;

    /// Fetches `search/multi` (movies, TV and people).
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbPage<TmdbMediaItem>>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails>;

    /// Fetches TV series details including the season list.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn tv_details(&self, series_id: u64, language: &str) -> Result<TmdbTvDetails>;

    /// Fetches TV season details including the episode list.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<TmdbTvSeason>;

    /// Fetches the external IDs (IMDb, TVDB) of a TV series.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn tv_external_ids(&self, series_id: u64) -> Result<TmdbExternalIds>;

    /// Fetches cast and crew.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn credits(&self, kind: MediaKind, id: u64, language: &str) -> Result<TmdbCredits>;

    /// Fetches watch providers for every region.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn watch_providers(&self, kind: MediaKind, id: u64) -> Result<TmdbWatchProviders>;

    /// Fetches trailers, teasers and clips.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn videos(&self, kind: MediaKind, id: u64, language: &str) -> Result<TmdbVideos>;

    /// Fetches person details.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn person(&self, person_id: u64, language: &str) -> Result<TmdbPerson>;

    /// Fetches a person's combined movie and TV credits.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    async fn person_combined_credits(
        &self,
        person_id: u64,
        language: &str,
    ) -> Result<TmdbCombinedCredits>;
}
