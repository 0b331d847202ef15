//! TMDB image URL construction.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Image widths used by cinehub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Posters in result lists.
    W400,
    /// Profile and filmography images.
    W342,
    /// Original upload.
    Original,
}

impl ImageSize {
    /// Returns the size segment of the image path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W400 => "w400",
            Self::W342 => "w342",
            Self::Original => "original",
        }
    }
}

/// Builds an image URL from a TMDB `*_path` value.
///
/// Returns `None` for a missing or empty path.
#[must_use]
pub fn image_url(size: ImageSize, path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{IMAGE_BASE_URL}{}{path}", size.as_str()))
}
