//! Watch sessions: season/episode selection and embed URLs.

use anyhow::{Context, Result};
use cinehub_api::embed::{EmbedTarget, embed_url};
use cinehub_api::tmdb::{MediaKind, TmdbApi, TmdbTvSeason};
use futures::future::try_join_all;
use tracing::instrument;
use url::Url;

/// An episode that can be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSummary {
    /// Episode number within its season.
    pub number: u32,
    /// Episode name.
    pub name: String,
}

/// A season and its episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonEpisodes {
    /// Season number.
    pub number: u32,
    /// Season name.
    pub name: String,
    /// Episodes in airing order.
    pub episodes: Vec<EpisodeSummary>,
}

impl From<TmdbTvSeason> for SeasonEpisodes {
    fn from(season: TmdbTvSeason) -> Self {
        Self {
            number: season.season_number,
            name: season
                .name
                .unwrap_or_else(|| format!("Season {}", season.season_number)),
            episodes: season
                .episodes
                .into_iter()
                .map(|e| EpisodeSummary {
                    number: e.episode_number,
                    name: e.name,
                })
                .collect(),
        }
    }
}

/// What the embedded player plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSession {
    media: MediaKind,
    id: u64,
    title: Option<String>,
    imdb_id: Option<String>,
    seasons: Vec<SeasonEpisodes>,
    season: u32,
    episode: u32,
}

impl WatchSession {
    /// Session for a movie. Needs no upstream data.
    #[must_use]
    pub const fn movie(id: u64) -> Self {
        Self {
            media: MediaKind::Movie,
            id,
            title: None,
            imdb_id: None,
            seasons: Vec::new(),
            season: 1,
            episode: 1,
        }
    }

    /// Loads a session for `media`/`id`.
    ///
    /// For TV the IMDb ID, the series details and every season listed in
    /// the details (specials included) are fetched; seasons are requested
    /// concurrently. A missing IMDb ID is tolerated. The first loaded
    /// season and its first episode start selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the series details or any season fails to load.
    #[instrument(skip_all, fields(%media, id))]
    pub async fn load<A: TmdbApi + Sync>(
        api: &A,
        media: MediaKind,
        id: u64,
        language: &str,
    ) -> Result<Self> {
        if media == MediaKind::Movie {
            return Ok(Self::movie(id));
        }

        let imdb_id = match api.tv_external_ids(id).await {
            Ok(ids) => ids.imdb_id.filter(|i| !i.is_empty()),
            Err(err) => {
                tracing::warn!(err = %format!("{err:#}"), "failed to load external ids");
                None
            }
        };

        let details = api
            .tv_details(id, language)
            .await
            .with_context(|| format!("failed to load tv {id}"))?;

        let seasons: Vec<SeasonEpisodes> = try_join_all(
            details
                .seasons
                .iter()
                .map(|s| api.tv_season(id, s.season_number, language)),
        )
        .await
        .with_context(|| format!("failed to load seasons of tv {id}"))?
        .into_iter()
        .map(SeasonEpisodes::from)
        .collect();

        let (season, episode) = seasons.first().map_or((1, 1), |s| {
            (s.number, s.episodes.first().map_or(1, |e| e.number))
        });

        tracing::debug!(seasons = seasons.len(), has_imdb = imdb_id.is_some(), "watch session loaded");
        Ok(Self {
            media,
            id,
            title: Some(details.name),
            imdb_id,
            seasons,
            season,
            episode,
        })
    }

    /// Movie or TV.
    #[must_use]
    pub const fn media(&self) -> MediaKind {
        self.media
    }

    /// TMDB ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Series name (TV only).
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// IMDb ID of the series, when known.
    #[must_use]
    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref()
    }

    /// Loaded seasons (empty for movies).
    #[must_use]
    pub fn seasons(&self) -> &[SeasonEpisodes] {
        &self.seasons
    }

    /// Selected season number.
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Selected episode number.
    #[must_use]
    pub const fn episode(&self) -> u32 {
        self.episode
    }

    /// The selected season's data.
    #[must_use]
    pub fn selected_season(&self) -> Option<&SeasonEpisodes> {
        self.seasons.iter().find(|s| s.number == self.season)
    }

    /// Selects `season` and its first episode.
    ///
    /// Returns `false` and changes nothing if the season is unknown.
    pub fn select_season(&mut self, season: u32) -> bool {
        let Some(found) = self.seasons.iter().find(|s| s.number == season) else {
            return false;
        };
        self.episode = found.episodes.first().map_or(1, |e| e.number);
        self.season = season;
        true
    }

    /// Selects `episode` within the selected season.
    ///
    /// Returns `false` and changes nothing if the episode is unknown.
    pub fn select_episode(&mut self, episode: u32) -> bool {
        let known = self
            .selected_season()
            .is_some_and(|s| s.episodes.iter().any(|e| e.number == episode));
        if known {
            self.episode = episode;
        }
        known
    }

    /// Embed target for the current selection.
    #[must_use]
    pub fn target(&self) -> EmbedTarget {
        match self.media {
            MediaKind::Movie => EmbedTarget::Movie { id: self.id },
            MediaKind::Tv => EmbedTarget::Tv {
                id: self.id,
                imdb_id: self.imdb_id.clone(),
                season: self.season,
                episode: self.episode,
            },
        }
    }

    /// Embed URL for the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built from `base`.
    pub fn embed_url(&self, base: &Url) -> Result<Url> {
        embed_url(base, &self.target())
    }
}
