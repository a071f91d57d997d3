//! Paginated query façade over movies and reviews.
//!
//! Every listing goes through one repository query built from an explicit
//! [`FilterSet`]; nothing is accumulated across calls.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    CarouselItem, DomainError, DomainResult, FilterSet, Movie, MovieSort, MovieSummary,
    RepositoryProvider, ReviewWithAuthor,
};
use crate::shared::{PageRequest, PageResult, PageWindow};

pub const DEFAULT_MOVIE_LIMIT: u32 = 20;
pub const DEFAULT_REVIEW_LIMIT: u32 = 10;

/// Upper bound on rows scanned when picking hero slides.
const HERO_SCAN: u64 = 100;

#[derive(Debug, Clone)]
pub struct MovieDetail {
    pub movie: Movie,
    /// Newest first
    pub reviews: Vec<ReviewWithAuthor>,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_movies(
        &self,
        filters: &FilterSet,
        page: PageRequest,
        sort: MovieSort,
    ) -> DomainResult<PageResult<Movie>> {
        filters.validate()?;
        let (items, total) = self
            .repos
            .movies()
            .query(filters, None, sort, page.window())
            .await?;
        debug!(total, page = page.page(), "Listed movies");
        Ok(PageResult::new(items, total, page))
    }

    pub async fn search_movies(
        &self,
        query: &str,
        filters: &FilterSet,
        page: PageRequest,
        sort: MovieSort,
    ) -> DomainResult<PageResult<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::Validation("search query must not be empty".into()));
        }
        filters.validate()?;
        let (items, total) = self
            .repos
            .movies()
            .query(filters, Some(query), sort, page.window())
            .await?;
        Ok(PageResult::new(items, total, page))
    }

    pub async fn get_movie_by_id(&self, id: &str) -> DomainResult<MovieDetail> {
        let movie = self.find_movie(id).await?;
        let reviews = self.repos.reviews().all_for_movie(id).await?;
        Ok(MovieDetail { movie, reviews })
    }

    /// `NotFound` when no movie has this id.
    pub async fn find_movie(&self, id: &str) -> DomainResult<Movie> {
        self.repos
            .movies()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie", "id", id))
    }

    pub async fn get_movie_reviews(
        &self,
        movie_id: &str,
        page: PageRequest,
    ) -> DomainResult<PageResult<ReviewWithAuthor>> {
        let (items, total) = self.repos.reviews().for_movie(movie_id, page.window()).await?;
        Ok(PageResult::new(items, total, page))
    }

    pub async fn movies_by_genre(&self, genre: &str) -> DomainResult<Vec<MovieSummary>> {
        if genre.trim().is_empty() {
            return Err(DomainError::Validation("genre must not be empty".into()));
        }
        self.repos.movies().movies_by_genre(genre.trim()).await
    }

    /// Top-rated released movies that have artwork to show.
    pub async fn hero_items(&self, size: usize) -> DomainResult<Vec<CarouselItem>> {
        let (movies, _) = self
            .repos
            .movies()
            .query(
                &FilterSet::default(),
                None,
                MovieSort::RatingDesc,
                PageWindow {
                    offset: 0,
                    limit: HERO_SCAN,
                },
            )
            .await?;
        Ok(movies
            .iter()
            .filter(|m| m.backdrop_url.is_some())
            .take(size)
            .map(CarouselItem::from)
            .collect())
    }

    /// Released movies, newest first.
    pub async fn trending(&self, page: PageRequest) -> DomainResult<PageResult<Movie>> {
        self.list_movies(&FilterSet::default(), page, MovieSort::Newest)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewMovie, NewReview};
    use crate::infrastructure::database::repositories::movie_repository::tests::new_movie;
    use crate::infrastructure::database::repositories::user_repository::tests::new_user;
    use crate::infrastructure::database::test_repositories;

    async fn service() -> (CatalogService, Arc<dyn RepositoryProvider>) {
        let repos = test_repositories().await;
        let movies = repos.movies();
        for (title, year, rating) in [
            ("Dune: Part Two", 2024, 8.8),
            ("Oppenheimer", 2023, 8.4),
            ("The Batman", 2022, 7.8),
        ] {
            movies.insert(new_movie(title, year, rating, &["Drama"])).await.unwrap();
        }
        movies
            .insert(NewMovie {
                backdrop_url: None,
                ..new_movie("The Dark Knight", 2008, 9.0, &["Action"])
            })
            .await
            .unwrap();
        (CatalogService::new(repos.clone()), repos)
    }

    #[tokio::test]
    async fn list_reports_has_more() {
        let (catalog, _) = service().await;
        let page = catalog
            .list_movies(&FilterSet::default(), PageRequest::new(1, 3).unwrap(), MovieSort::RatingDesc)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 4);
        assert!(page.has_more);

        let last = catalog
            .list_movies(&FilterSet::default(), PageRequest::new(2, 3).unwrap(), MovieSort::RatingDesc)
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn invalid_filters_are_rejected() {
        let (catalog, _) = service().await;
        let err = catalog
            .list_movies(
                &FilterSet::default().with_min_rating(12.0),
                PageRequest::new(1, 20).unwrap(),
                MovieSort::RatingDesc,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_search_is_a_validation_error() {
        let (catalog, _) = service().await;
        let err = catalog
            .search_movies("   ", &FilterSet::default(), PageRequest::new(1, 20).unwrap(), MovieSort::RatingDesc)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn detail_includes_reviews_and_missing_is_not_found() {
        let (catalog, repos) = service().await;
        let page = catalog
            .search_movies("batman", &FilterSet::default(), PageRequest::new(1, 20).unwrap(), MovieSort::RatingDesc)
            .await
            .unwrap();
        let batman = &page.items[0];
        let user = repos.users().create(new_user("critic@example.com")).await.unwrap();
        repos
            .reviews()
            .create(NewReview {
                movie_id: batman.id.clone(),
                user_id: user.id,
                rating: 8,
                text: "Moody".into(),
                sentiment: None,
                is_spoiler: false,
            })
            .await
            .unwrap();

        let detail = catalog.get_movie_by_id(&batman.id).await.unwrap();
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.reviews[0].author.as_ref().unwrap().name, "Film Fan");

        assert!(catalog.get_movie_by_id("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn hero_skips_movies_without_backdrop() {
        let (catalog, _) = service().await;
        let hero = catalog.hero_items(5).await.unwrap();
        let titles: Vec<_> = hero.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["Dune: Part Two", "Oppenheimer", "The Batman"]);
    }

    #[tokio::test]
    async fn trending_is_newest_first() {
        let (catalog, _) = service().await;
        let page = catalog.trending(PageRequest::new(1, 2).unwrap()).await.unwrap();
        assert_eq!(page.items[0].title, "Dune: Part Two");
        assert_eq!(page.items[1].title, "Oppenheimer");
    }
}
