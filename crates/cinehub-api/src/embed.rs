//! Video-embed and trailer URL construction.

use anyhow::{Context, Result};
use url::Url;

use crate::tmdb::TmdbVideo;

/// Default base URL of the video-embed service.
pub const DEFAULT_EMBED_BASE_URL: &str = "https://vidsrc.xyz/embed/";

/// Base URL for YouTube watch links.
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch";

/// What to play through the embed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedTarget {
    /// A movie by TMDB ID.
    Movie {
        /// TMDB movie ID.
        id: u64,
    },
    /// A TV episode.
    Tv {
        /// TMDB series ID.
        id: u64,
        /// IMDb ID of the series, when known.
        imdb_id: Option<String>,
        /// Season number.
        season: u32,
        /// Episode number.
        episode: u32,
    },
}

/// Builds the embed URL for `target` under `base`.
///
/// TV targets with a known IMDb ID use the query form
/// `tv?imdb=..&season=..&episode=..`; without one the series page
/// `tv/{id}` is used.
///
/// # Errors
///
/// Returns an error if the path cannot be joined onto `base`.
pub fn embed_url(base: &Url, target: &EmbedTarget) -> Result<Url> {
    match target {
        EmbedTarget::Movie { id } => base
            .join(&format!("movie/{id}"))
            .with_context(|| format!("failed to build movie embed URL for {id}")),
        EmbedTarget::Tv {
            id,
            imdb_id,
            season,
            episode,
        } => match imdb_id.as_deref().filter(|imdb| !imdb.is_empty()) {
            Some(imdb) => {
                let mut url = base
                    .join("tv")
                    .context("failed to build tv embed URL")?;
                url.query_pairs_mut()
                    .append_pair("imdb", imdb)
                    .append_pair("season", &season.to_string())
                    .append_pair("episode", &episode.to_string());
                Ok(url)
            }
            None => base
                .join(&format!("tv/{id}"))
                .with_context(|| format!("failed to build tv embed URL for {id}")),
        },
    }
}

/// Picks the first YouTube video of type `Trailer`.
#[must_use]
pub fn select_trailer(videos: &[TmdbVideo]) -> Option<&TmdbVideo> {
    videos
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
}

/// Builds the YouTube watch URL for a video key.
///
/// # Errors
///
/// Returns an error if the YouTube base URL fails to parse.
pub fn youtube_watch_url(key: &str) -> Result<Url> {
    Url::parse_with_params(YOUTUBE_WATCH_URL, &[("v", key)])
        .context("failed to build YouTube watch URL")
}
