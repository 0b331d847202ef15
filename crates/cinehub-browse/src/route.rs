//! Route parsing and formatting.
//!
//! Routes address every view of the application:
//!
//! | route                        | view                    |
//! |------------------------------|-------------------------|
//! | `/`, `/trending`             | trending list           |
//! | `/movies`, `/tv`, `/anime`   | category lists          |
//! | `/search?q=<term>`           | search results          |
//! | `/movie/<id>`, `/tv/<id>`    | title details           |
//! | `/<type>/<id>/trailer`       | trailer                 |
//! | `/watch/<type>/<id>`         | embedded player         |
//! | `/person/<id>`               | person filmography      |
//!
//! List routes accept an optional `?page=<n>`.

use std::fmt;
use std::str::FromStr;

use cinehub_api::tmdb::MediaKind;
use url::Url;
use url::form_urlencoded;

use crate::category::{Category, PageRequest};
use crate::error::RouteError;
use crate::machine::BrowseState;

/// Base used to resolve relative route strings.
const ROUTE_BASE: &str = "cinehub://app/";

/// A parsed application route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// A result list (category, search term, page).
    Browse(PageRequest),
    /// Title details.
    Title {
        /// Movie or TV.
        media: MediaKind,
        /// TMDB ID.
        id: u64,
    },
    /// Trailer of a title.
    Trailer {
        /// Movie or TV.
        media: MediaKind,
        /// TMDB ID.
        id: u64,
    },
    /// Embedded player for a title.
    Watch {
        /// Movie or TV.
        media: MediaKind,
        /// TMDB ID.
        id: u64,
    },
    /// Person details.
    Person {
        /// TMDB person ID.
        id: u64,
    },
}

impl Route {
    /// Parses a route string such as `/search?q=batman&page=2`.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] describing the first offending part.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let base = Url::parse(ROUTE_BASE).map_err(|e| RouteError::Unknown(e.to_string()))?;
        let url = base
            .join(input)
            .map_err(|_| RouteError::Unknown(input.to_owned()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let mut page = 1_u32;
        let mut query = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => page = parse_page(&value)?,
                "q" => query = Some(value.into_owned()),
                _ => {}
            }
        }

        match segments.as_slice() {
            [] => browse(Category::Trending, page),
            ["search"] => {
                let term = query.ok_or(RouteError::MissingSearchTerm)?;
                PageRequest::search(&term, page)
                    .map(Self::Browse)
                    .map_err(|_| RouteError::MissingSearchTerm)
            }
            [category] => browse(category.parse()?, page),
            ["person", id] => Ok(Self::Person { id: parse_id(id)? }),
            ["watch", media, id] => Ok(Self::Watch {
                media: parse_media(media, input)?,
                id: parse_id(id)?,
            }),
            [media, id, "trailer"] => Ok(Self::Trailer {
                media: parse_media(media, input)?,
                id: parse_id(id)?,
            }),
            [media, id] => Ok(Self::Title {
                media: parse_media(media, input)?,
                id: parse_id(id)?,
            }),
            _ => Err(RouteError::Unknown(input.to_owned())),
        }
    }

    /// Route of the listing currently displayed by `state`.
    #[must_use]
    pub fn from_state(state: &BrowseState) -> Self {
        Self::Browse(PageRequest {
            category: state.category,
            term: state.search_term.clone(),
            page: state.current_page,
        })
    }

    /// Whether this is a list route.
    #[must_use]
    pub const fn is_browse(&self) -> bool {
        matches!(self, Self::Browse(_))
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browse(request) => {
                write!(f, "/{}", request.category())?;
                let mut query = form_urlencoded::Serializer::new(String::new());
                if request.category() == Category::Search {
                    query.append_pair("q", request.term());
                }
                if request.page() > 1 {
                    query.append_pair("page", &request.page().to_string());
                }
                let query = query.finish();
                if query.is_empty() {
                    Ok(())
                } else {
                    write!(f, "?{query}")
                }
            }
            Self::Title { media, id } => write!(f, "/{media}/{id}"),
            Self::Trailer { media, id } => write!(f, "/{media}/{id}/trailer"),
            Self::Watch { media, id } => write!(f, "/watch/{media}/{id}"),
            Self::Person { id } => write!(f, "/person/{id}"),
        }
    }
}

fn browse(category: Category, page: u32) -> Result<Route, RouteError> {
    PageRequest::browse(category, page)
        .map(Route::Browse)
        .map_err(|_| RouteError::UnknownCategory(category.to_string()))
}

fn parse_page(value: &str) -> Result<u32, RouteError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .ok_or_else(|| RouteError::InvalidPage(value.to_owned()))
}

fn parse_id(value: &str) -> Result<u64, RouteError> {
    value
        .parse()
        .map_err(|_| RouteError::InvalidId(value.to_owned()))
}

fn parse_media(value: &str, input: &str) -> Result<MediaKind, RouteError> {
    MediaKind::from_media_type(value).ok_or_else(|| RouteError::Unknown(input.to_owned()))
}
