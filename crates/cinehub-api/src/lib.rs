//! API client library for cinehub.
//!
//! Provides the TMDB API client and URL builders for the video-embed
//! service and YouTube trailers.

/// Video-embed and trailer URL construction.
pub mod embed;

/// TMDB API client.
pub mod tmdb;
