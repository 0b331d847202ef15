//! Result items decoded from TMDB list pages.

use chrono::{Datelike, NaiveDate};
use cinehub_api::tmdb::{ImageSize, MediaKind, TmdbMediaItem, TmdbPage, image_url};

use crate::category::Category;
use crate::error::FetchError;
use crate::route::Route;

/// One card in the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    /// TMDB ID.
    pub id: u64,
    /// `title` for movies, `name` for TV.
    pub display_title: String,
    /// Movie or TV.
    pub media_type: MediaKind,
    /// Release or first air date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Poster URL (w400).
    pub poster_url: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
}

impl ResultItem {
    /// Decodes one list element.
    ///
    /// Returns `Ok(None)` for people, which `search/multi` and
    /// `trending/all` mix into their results.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] if the element has neither `title`
    /// nor `name`, or carries an unknown `media_type`.
    pub fn from_tmdb(item: TmdbMediaItem, category: Category) -> Result<Option<Self>, FetchError> {
        let media_type = match item.media_type.as_deref() {
            Some("person") => return Ok(None),
            Some(value) => MediaKind::from_media_type(value).ok_or_else(|| {
                FetchError::Decode(format!("item {}: unknown media_type {value:?}", item.id))
            })?,
            None if item.first_air_date.is_some() => MediaKind::Tv,
            None => category.default_media(),
        };

        let display_title = item
            .title
            .or(item.name)
            .ok_or_else(|| FetchError::Decode(format!("item {}: missing title and name", item.id)))?;

        let release_date = non_empty(item.release_date).or_else(|| non_empty(item.first_air_date));
        let poster_url = image_url(ImageSize::W400, item.poster_path.as_deref());

        Ok(Some(Self {
            id: item.id,
            display_title,
            media_type,
            release_date,
            poster_url,
            overview: non_empty(item.overview),
            vote_average: item.vote_average,
        }))
    }

    /// Year of the release date, if it parses.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }

    /// Route of this item's details view.
    #[must_use]
    pub const fn route(&self) -> Route {
        Route::Title {
            media: self.media_type,
            id: self.id,
        }
    }
}

/// One page of results plus the upstream total page count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    /// Items on this page, people removed.
    pub items: Vec<ResultItem>,
    /// Total pages reported upstream (unclamped).
    pub total_pages: u32,
}

impl ResultPage {
    /// Decodes a TMDB list page.
    ///
    /// # Errors
    ///
    /// Returns the first item decode error.
    pub fn from_tmdb(page: TmdbPage<TmdbMediaItem>, category: Category) -> Result<Self, FetchError> {
        let mut items = Vec::with_capacity(page.results.len());
        for raw in page.results {
            if let Some(item) = ResultItem::from_tmdb(raw, category)? {
                items.push(item);
            }
        }
        Ok(Self {
            items,
            total_pages: page.total_pages,
        })
    }
}

/// Parses the year of a `YYYY-MM-DD` date.
pub(crate) fn parse_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
