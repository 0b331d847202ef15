//! TMDB request parameters.

use std::fmt;

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB genre ID for "Animation".
pub const ANIMATION_GENRE_ID: u32 = 16;

/// Media kind used in `{movie,tv}/{id}/...` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Movie.
    Movie,
    /// TV series.
    Tv,
}

impl MediaKind {
    /// Returns the path segment used by TMDB (`movie` or `tv`).
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Parses a TMDB `media_type` value. Returns `None` for anything
    /// other than `movie` or `tv` (e.g. `person`).
    #[must_use]
    pub fn from_media_type(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Parameters shared by the plain list endpoints
/// (`trending/all/week`, `movie/popular`, `tv/popular`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Result page (1-500).
    pub page: u32,
    /// Response language.
    pub language: String,
}

impl ListParams {
    /// Creates params for the given page in the default language.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            page,
            language: String::from(DEFAULT_LANGUAGE),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Parameters for `discover/tv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverTvParams {
    /// Page and language.
    pub list: ListParams,
    /// Comma-separated genre IDs.
    pub with_genres: Option<String>,
    /// Original language filter (ISO 639-1).
    pub with_original_language: Option<String>,
    /// Sort order (e.g. "popularity.desc").
    pub sort_by: String,
}

impl DiscoverTvParams {
    /// Creates params sorted by popularity.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            list: ListParams::new(page),
            with_genres: None,
            with_original_language: None,
            sort_by: String::from("popularity.desc"),
        }
    }

    /// Japanese animation, the query behind the anime listing.
    #[must_use]
    pub fn anime(page: u32) -> Self {
        Self::new(page)
            .with_genres(ANIMATION_GENRE_ID.to_string())
            .with_original_language("ja")
    }

    /// Sets the genre filter.
    #[must_use]
    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.with_genres = Some(genres.into());
        self
    }

    /// Sets the original language filter.
    #[must_use]
    pub fn with_original_language(mut self, language: impl Into<String>) -> Self {
        self.with_original_language = Some(language.into());
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.list = self.list.language(language);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.list.to_query();
        query.push(("sort_by", self.sort_by.clone()));
        if let Some(ref genres) = self.with_genres {
            query.push(("with_genres", genres.clone()));
        }
        if let Some(ref lang) = self.with_original_language {
            query.push(("with_original_language", lang.clone()));
        }
        query
    }
}

/// Parameters for `search/multi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMultiParams {
    /// Search query (required).
    pub query: String,
    /// Page and language.
    pub list: ListParams,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMultiParams {
    /// Creates search params for the first page.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            list: ListParams::new(1),
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.list.page = page;
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.list = self.list.language(language);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("query", self.query.clone())];
        query.extend(self.list.to_query());
        query.push(("include_adult", self.include_adult.to_string()));
        query
    }
}
