//! Review repository interface

use async_trait::async_trait;

use super::{HelpfulVote, NewReview, Review, ReviewUpdate, ReviewWithAuthor};
use crate::shared::{DomainResult, PageWindow};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// One window of a movie's reviews, newest first, plus the total.
    async fn for_movie(
        &self,
        movie_id: &str,
        window: PageWindow,
    ) -> DomainResult<(Vec<ReviewWithAuthor>, u64)>;

    /// Every review of a movie, newest first.
    async fn all_for_movie(&self, movie_id: &str) -> DomainResult<Vec<ReviewWithAuthor>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Review>>;
    async fn create(&self, review: NewReview) -> DomainResult<Review>;
    async fn update(&self, id: &str, update: ReviewUpdate) -> DomainResult<Option<Review>>;
    /// Returns `false` when no row matched.
    async fn delete(&self, id: &str) -> DomainResult<bool>;

    /// Insert or replace the vote keyed by `(review_id, user_id)`.
    async fn upsert_vote(
        &self,
        review_id: &str,
        user_id: &str,
        is_helpful: bool,
    ) -> DomainResult<HelpfulVote>;
}
