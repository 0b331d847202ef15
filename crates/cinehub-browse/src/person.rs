//! Person details and filmography.

use std::cmp::Ordering;

use anyhow::{Context, Result};
use cinehub_api::tmdb::{ImageSize, MediaKind, TmdbApi, TmdbPersonCredit, image_url};
use tracing::instrument;

use crate::item::parse_year;
use crate::route::Route;

/// Maximum number of filmography entries shown.
pub const FILMOGRAPHY_LIMIT: usize = 12;

/// One title in a person's filmography.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmographyEntry {
    /// Movie or TV.
    pub media: MediaKind,
    /// TMDB ID of the title.
    pub id: u64,
    /// Title or name.
    pub title: String,
    /// Character played.
    pub character: Option<String>,
    /// Release or first air year.
    pub year: Option<i32>,
    /// Poster URL (w342).
    pub poster_url: Option<String>,
    /// Popularity score used for ordering.
    pub popularity: f64,
}

impl FilmographyEntry {
    /// Route of the title's details view.
    #[must_use]
    pub const fn route(&self) -> Route {
        Route::Title {
            media: self.media,
            id: self.id,
        }
    }
}

/// Person details with their best-known titles.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonProfile {
    /// TMDB person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Biography.
    pub biography: Option<String>,
    /// Birthday (YYYY-MM-DD).
    pub birthday: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Known-for department.
    pub known_for_department: Option<String>,
    /// Profile image URL (w342).
    pub profile_url: Option<String>,
    /// Most popular acting credits.
    pub filmography: Vec<FilmographyEntry>,
}

/// Loads a person and their filmography.
///
/// A credits failure leaves the filmography empty.
///
/// # Errors
///
/// Returns an error if the person request fails.
#[instrument(skip_all, fields(id))]
pub async fn load_person<A: TmdbApi + Sync>(
    api: &A,
    id: u64,
    language: &str,
) -> Result<PersonProfile> {
    let person = api
        .person(id, language)
        .await
        .with_context(|| format!("failed to load person {id}"))?;

    let filmography = match api.person_combined_credits(id, language).await {
        Ok(credits) => build_filmography(credits.cast),
        Err(err) => {
            tracing::warn!(err = %format!("{err:#}"), "failed to load combined credits");
            Vec::new()
        }
    };

    Ok(PersonProfile {
        id: person.id,
        name: person.name,
        biography: person.biography.filter(|b| !b.is_empty()),
        birthday: person.birthday.filter(|b| !b.is_empty()),
        place_of_birth: person.place_of_birth.filter(|p| !p.is_empty()),
        known_for_department: person.known_for_department,
        profile_url: image_url(ImageSize::W342, person.profile_path.as_deref()),
        filmography,
    })
}

/// Sorts credits by popularity (descending) and keeps the first
/// [`FILMOGRAPHY_LIMIT`]. Credits that are neither movies nor TV, or
/// that have no title, are dropped.
#[must_use]
pub fn build_filmography(credits: Vec<TmdbPersonCredit>) -> Vec<FilmographyEntry> {
    let mut entries: Vec<FilmographyEntry> = credits
        .into_iter()
        .filter_map(|credit| {
            let media = MediaKind::from_media_type(&credit.media_type)?;
            let title = credit.title.or(credit.name)?;
            let year = credit
                .release_date
                .as_deref()
                .and_then(parse_year)
                .or_else(|| credit.first_air_date.as_deref().and_then(parse_year));
            Some(FilmographyEntry {
                media,
                id: credit.id,
                title,
                character: credit.character.filter(|c| !c.is_empty()),
                year,
                poster_url: image_url(ImageSize::W342, credit.poster_path.as_deref()),
                popularity: credit.popularity,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.popularity
            .partial_cmp(&a.popularity)
            .unwrap_or(Ordering::Equal)
    });
    entries.truncate(FILMOGRAPHY_LIMIT);
    entries
}
