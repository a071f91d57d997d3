//! Movie repository interface

use async_trait::async_trait;

use super::{FilterSet, Movie, MovieSort, MovieSummary, NewMovie};
use crate::shared::{DomainResult, PageWindow};

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Released movies matching every predicate in `filters` and, when
    /// given, the store's title text match. Returns one window plus the
    /// total number of matching rows.
    async fn query(
        &self,
        filters: &FilterSet,
        text: Option<&str>,
        sort: MovieSort,
        window: PageWindow,
    ) -> DomainResult<(Vec<Movie>, u64)>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Movie>>;

    /// Store function `get_movies_by_genre`.
    async fn movies_by_genre(&self, genre: &str) -> DomainResult<Vec<MovieSummary>>;

    async fn insert(&self, movie: NewMovie) -> DomainResult<Movie>;

    async fn count(&self) -> DomainResult<u64>;
}
