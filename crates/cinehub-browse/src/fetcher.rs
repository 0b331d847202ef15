//! Category fetcher contract and the TMDB adapter.
#![allow(clippy::future_not_send)]

use cinehub_api::tmdb::{DiscoverTvParams, ListParams, SearchMultiParams, TmdbApi};
use tracing::instrument;

use crate::category::{Category, PageRequest};
use crate::error::FetchError;
use crate::item::ResultPage;

/// Retrieves one page of one listing.
///
/// Uses `trait_variant::make` to generate a `Send`-bound variant so
/// fetches can run on spawned tasks.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CategoryFetcher: Send)]
pub trait LocalCategoryFetcher {
    /// Fetches the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport or HTTP failure and
    /// [`FetchError::Decode`] when the response cannot be decoded.
    async fn fetch(&self, request: &PageRequest) -> Result<ResultPage, FetchError>;
}

/// [`CategoryFetcher`] backed by the TMDB API.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbCategoryFetcher<A> {
    api: A,
    language: String,
}

impl<A> TmdbCategoryFetcher<A> {
    /// Creates a fetcher requesting results in `language`.
    pub fn new(api: A, language: impl Into<String>) -> Self {
        Self {
            api,
            language: language.into(),
        }
    }

    /// Underlying API client.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl<A: TmdbApi + Sync> CategoryFetcher for TmdbCategoryFetcher<A> {
    #[instrument(skip_all, fields(category = %request.category(), page = request.page()))]
    async fn fetch(&self, request: &PageRequest) -> Result<ResultPage, FetchError> {
        let list = ListParams::new(request.page()).language(self.language.as_str());
        let response = match request.category() {
            Category::Trending => self.api.trending(&list).await,
            Category::Movies => self.api.popular_movies(&list).await,
            Category::Tv => self.api.popular_tv(&list).await,
            Category::Anime => {
                let params = DiscoverTvParams::anime(request.page())
                    .language(self.language.as_str());
                self.api.discover_tv(&params).await
            }
            Category::Search => {
                let params = SearchMultiParams::new(request.term())
                    .page(request.page())
                    .language(self.language.as_str());
                self.api.search_multi(&params).await
            }
        };

        let page = response.map_err(|err| FetchError::from_upstream(&err))?;
        tracing::debug!(
            results = page.results.len(),
            total_pages = page.total_pages,
            "fetched listing"
        );
        ResultPage::from_tmdb(page, request.category())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::{Category, CategoryFetcher, FetchError, PageRequest, TmdbCategoryFetcher};
    use crate::test_support::MockTmdbApi;

    #[tokio::test]
    async fn test_each_category_hits_its_endpoint() {
        // Arrange
        let fetcher = TmdbCategoryFetcher::new(MockTmdbApi::new(), "en-US");

        // Act
        for category in Category::BROWSABLE {
            let request = PageRequest::browse(category, 2).unwrap();
            fetcher.fetch(&request).await.unwrap();
        }
        let search = PageRequest::search("batman", 3).unwrap();
        fetcher.fetch(&search).await.unwrap();

        // Assert
        let calls = fetcher.api().calls();
        assert_eq!(
            calls,
            vec![
                String::from("trending page=2"),
                String::from("popular_movies page=2"),
                String::from("popular_tv page=2"),
                String::from("discover_tv page=2 genres=16 lang=ja"),
                String::from("search_multi page=3 query=batman adult=false"),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_drops_people() {
        // Arrange
        let fetcher = TmdbCategoryFetcher::new(MockTmdbApi::new(), "en-US");
        let request = PageRequest::search("batman", 1).unwrap();

        // Act
        let page = fetcher.fetch(&request).await.unwrap();

        // Assert
        assert_eq!(page.total_pages, 12);
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_network_error() {
        // Arrange
        let fetcher = TmdbCategoryFetcher::new(MockTmdbApi::new().failing(), "en-US");
        let request = PageRequest::browse(Category::Movies, 1).unwrap();

        // Act
        let result = fetcher.fetch(&request).await;

        // Assert
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        // Arrange
        let fetcher = TmdbCategoryFetcher::new(MockTmdbApi::new().malformed(), "en-US");
        let request = PageRequest::browse(Category::Trending, 1).unwrap();

        // Act
        let result = fetcher.fetch(&request).await;

        // Assert
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
