//! Fixture-backed `TmdbApi` mock shared by the unit tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use cinehub_api::tmdb::{
    DiscoverTvParams, ListParams, MediaKind, SearchMultiParams, TmdbApi, TmdbCombinedCredits,
    TmdbCredits, TmdbExternalIds, TmdbMediaItem, TmdbMovieDetails, TmdbPage, TmdbPerson,
    TmdbTvDetails, TmdbTvSeason, TmdbVideos, TmdbWatchProviders,
};
use serde::de::DeserializeOwned;

const TRENDING: &str = include_str!("../../../fixtures/tmdb/trending_all_week.json");
const DISCOVER_ANIME: &str = include_str!("../../../fixtures/tmdb/discover_tv_anime.json");
const SEARCH_MULTI: &str = include_str!("../../../fixtures/tmdb/search_multi_batman.json");
const MOVIE_DETAILS: &str = include_str!("../../../fixtures/tmdb/movie_details_272.json");
const MOVIE_CREDITS: &str = include_str!("../../../fixtures/tmdb/movie_credits_272.json");
const MOVIE_PROVIDERS: &str = include_str!("../../../fixtures/tmdb/movie_watch_providers_272.json");
const MOVIE_VIDEOS: &str = include_str!("../../../fixtures/tmdb/movie_videos_272.json");
const TV_DETAILS: &str = include_str!("../../../fixtures/tmdb/tv_details_126308.json");
const TV_DETAILS_WITH_SPECIALS: &str = include_str!("../../../fixtures/tmdb/tv_details_1396.json");
const TV_SEASON: &str = include_str!("../../../fixtures/tmdb/tv_season_126308_1.json");
const TV_EXTERNAL_IDS: &str = include_str!("../../../fixtures/tmdb/tv_external_ids_126308.json");
const PERSON: &str = include_str!("../../../fixtures/tmdb/person_3894.json");
const PERSON_CREDITS: &str =
    include_str!("../../../fixtures/tmdb/person_3894_combined_credits.json");

/// Records every call and answers from the JSON fixtures.
#[derive(Debug, Default)]
pub struct MockTmdbApi {
    calls: Mutex<Vec<String>>,
    fail_all: bool,
    malformed: bool,
    failing: HashSet<&'static str>,
    no_imdb: bool,
}

impl MockTmdbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a transport-style error.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Calls to `endpoint` fail with a transport-style error.
    pub fn fail_endpoint(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    /// Every call fails to decode.
    pub fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }

    /// External IDs come back without an IMDb ID.
    pub fn without_imdb(mut self) -> Self {
        self.no_imdb = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(endpoint))
            .count()
    }

    fn answer<T: DeserializeOwned>(&self, endpoint: &'static str, call: String, json: &str) -> Result<T> {
        self.calls.lock().unwrap().push(call);
        if self.fail_all || self.failing.contains(endpoint) {
            bail!("request failed: {endpoint}: connection refused");
        }
        let body = if self.malformed { r#"{"page":"one"}"# } else { json };
        serde_json::from_str(body).with_context(|| format!("failed to decode JSON response: {endpoint}"))
    }
}

impl TmdbApi for MockTmdbApi {
    async fn trending(&self, params: &ListParams) -> Result<TmdbPage<TmdbMediaItem>> {
        self.answer("trending", format!("trending page={}", params.page), TRENDING)
    }

    async fn popular_movies(&self, params: &ListParams) -> Result<TmdbPage<TmdbMediaItem>> {
        self.answer("popular_movies", format!("popular_movies page={}", params.page), TRENDING)
    }

    async fn popular_tv(&self, params: &ListParams) -> Result<TmdbPage<TmdbMediaItem>> {
        self.answer("popular_tv", format!("popular_tv page={}", params.page), DISCOVER_ANIME)
    }

    async fn discover_tv(&self, params: &DiscoverTvParams) -> Result<TmdbPage<TmdbMediaItem>> {
        let call = format!(
            "discover_tv page={} genres={} lang={}",
            params.list.page,
            params.with_genres.as_deref().unwrap_or("-"),
            params.with_original_language.as_deref().unwrap_or("-"),
        );
        self.answer("discover_tv", call, DISCOVER_ANIME)
    }

    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbPage<TmdbMediaItem>> {
        let call = format!(
            "search_multi page={} query={} adult={}",
            params.list.page, params.query, params.include_adult
        );
        self.answer("search_multi", call, SEARCH_MULTI)
    }

    async fn movie_details(&self, movie_id: u64, _language: &str) -> Result<TmdbMovieDetails> {
        self.answer("movie_details", format!("movie_details id={movie_id}"), MOVIE_DETAILS)
    }

    async fn tv_details(&self, series_id: u64, _language: &str) -> Result<TmdbTvDetails> {
        let fixture = if series_id == 1396 {
            TV_DETAILS_WITH_SPECIALS
        } else {
            TV_DETAILS
        };
        self.answer("tv_details", format!("tv_details id={series_id}"), fixture)
    }

    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        _language: &str,
    ) -> Result<TmdbTvSeason> {
        let mut season: TmdbTvSeason = self.answer(
            "tv_season",
            format!("tv_season id={series_id} season={season_number}"),
            TV_SEASON,
        )?;
        season.season_number = season_number;
        season.name = Some(format!("Season {season_number}"));
        Ok(season)
    }

    async fn tv_external_ids(&self, series_id: u64) -> Result<TmdbExternalIds> {
        let mut ids: TmdbExternalIds = self.answer(
            "tv_external_ids",
            format!("tv_external_ids id={series_id}"),
            TV_EXTERNAL_IDS,
        )?;
        if self.no_imdb {
            ids.imdb_id = None;
        }
        Ok(ids)
    }

    async fn credits(&self, kind: MediaKind, id: u64, _language: &str) -> Result<TmdbCredits> {
        self.answer("credits", format!("credits {kind} id={id}"), MOVIE_CREDITS)
    }

    async fn watch_providers(&self, kind: MediaKind, id: u64) -> Result<TmdbWatchProviders> {
        self.answer("watch_providers", format!("watch_providers {kind} id={id}"), MOVIE_PROVIDERS)
    }

    async fn videos(&self, kind: MediaKind, id: u64, _language: &str) -> Result<TmdbVideos> {
        self.answer("videos", format!("videos {kind} id={id}"), MOVIE_VIDEOS)
    }

    async fn person(&self, person_id: u64, _language: &str) -> Result<TmdbPerson> {
        self.answer("person", format!("person id={person_id}"), PERSON)
    }

    async fn person_combined_credits(
        &self,
        person_id: u64,
        _language: &str,
    ) -> Result<TmdbCombinedCredits> {
        self.answer(
            "person_combined_credits",
            format!("person_combined_credits id={person_id}"),
            PERSON_CREDITS,
        )
    }
}
