//! Browse categories and page requests.

use std::fmt;
use std::str::FromStr;

use cinehub_api::tmdb::MediaKind;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{InvalidInput, RouteError};

/// A result listing. Determines which upstream query feeds the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Weekly trending movies and TV.
    #[default]
    Trending,
    /// Popular movies.
    Movies,
    /// Popular TV series.
    Tv,
    /// Popular Japanese animation.
    Anime,
    /// Free-text search.
    Search,
}

impl Category {
    /// Categories selectable as tabs, in display order.
    pub const BROWSABLE: [Self; 4] = [Self::Trending, Self::Movies, Self::Tv, Self::Anime];

    /// Returns the lowercase name used in routes and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Movies => "movies",
            Self::Tv => "tv",
            Self::Anime => "anime",
            Self::Search => "search",
        }
    }

    /// Returns the tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::Movies => "Movies",
            Self::Tv => "TV Shows",
            Self::Anime => "Anime",
            Self::Search => "Search",
        }
    }

    /// Whether the category can be selected without a search term.
    #[must_use]
    pub const fn is_browsable(self) -> bool {
        !matches!(self, Self::Search)
    }

    /// Media type assumed for items that carry neither `media_type` nor
    /// `first_air_date`.
    #[must_use]
    pub const fn default_media(self) -> MediaKind {
        match self {
            Self::Tv | Self::Anime => MediaKind::Tv,
            Self::Trending | Self::Movies | Self::Search => MediaKind::Movie,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trending" => Ok(Self::Trending),
            "movies" => Ok(Self::Movies),
            "tv" => Ok(Self::Tv),
            "anime" => Ok(Self::Anime),
            "search" => Ok(Self::Search),
            other => Err(RouteError::UnknownCategory(other.to_owned())),
        }
    }
}

/// Normalizes a search term (NFKC, trimmed).
///
/// Returns `None` when nothing remains.
#[must_use]
pub fn normalize_search_term(term: &str) -> Option<String> {
    let normalized: String = term.nfkc().collect();
    let trimmed = normalized.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// One page of one listing: the unit the fetcher consumes.
///
/// `term` is empty unless `category` is [`Category::Search`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub(crate) category: Category,
    pub(crate) term: String,
    pub(crate) page: u32,
}

impl PageRequest {
    /// Request for a browsable category.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NotBrowsable`] for [`Category::Search`].
    pub const fn browse(category: Category, page: u32) -> Result<Self, InvalidInput> {
        if !category.is_browsable() {
            return Err(InvalidInput::NotBrowsable);
        }
        Ok(Self {
            category,
            term: String::new(),
            page,
        })
    }

    /// Request for a search page. The term is normalized first.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::EmptySearchTerm`] if the normalized term is
    /// empty.
    pub fn search(term: &str, page: u32) -> Result<Self, InvalidInput> {
        let term = normalize_search_term(term).ok_or(InvalidInput::EmptySearchTerm)?;
        Ok(Self {
            category: Category::Search,
            term,
            page,
        })
    }

    /// Same listing, different page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            category: self.category,
            term: self.term.clone(),
            page,
        }
    }

    /// Requested category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Search term (empty for browsable categories).
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Requested page (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        // Arrange & Act & Assert
        for category in [
            Category::Trending,
            Category::Movies,
            Category::Tv,
            Category::Anime,
            Category::Search,
        ] {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category() {
        // Arrange & Act
        let result = "documentaries".parse::<Category>();

        // Assert
        assert_eq!(
            result,
            Err(RouteError::UnknownCategory(String::from("documentaries")))
        );
    }

    #[test]
    fn test_default_media() {
        // Arrange & Act & Assert
        assert_eq!(Category::Anime.default_media(), MediaKind::Tv);
        assert_eq!(Category::Trending.default_media(), MediaKind::Movie);
    }

    #[test]
    fn test_browse_rejects_search() {
        // Arrange & Act
        let result = PageRequest::browse(Category::Search, 1);

        // Assert
        assert_eq!(result, Err(InvalidInput::NotBrowsable));
    }

    #[test]
    fn test_search_normalizes_term() {
        // Arrange: full-width letters and surrounding spaces
        let raw = "  ＢＡＴＭＡＮ\u{3000}";

        // Act
        let request = PageRequest::search(raw, 1).unwrap();

        // Assert
        assert_eq!(request.term(), "BATMAN");
        assert_eq!(request.category(), Category::Search);
    }

    #[test]
    fn test_search_rejects_blank_terms() {
        // Arrange & Act & Assert
        assert_eq!(
            PageRequest::search("", 1),
            Err(InvalidInput::EmptySearchTerm)
        );
        assert_eq!(
            PageRequest::search("   ", 1),
            Err(InvalidInput::EmptySearchTerm)
        );
    }

    #[test]
    fn test_config_uses_lowercase_names() {
        // Arrange
        let json = r#""anime""#;

        // Act
        let category: Category = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(category, Category::Anime);
    }
}
