//! Review write operations.
//!
//! Single-record pass-through mutations; only author ownership is checked
//! here. `helpful_count` is not maintained by this layer.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, HelpfulVote, NewReview, RepositoryProvider, Review, ReviewUpdate,
    Sentiment,
};

pub const MAX_REVIEW_LENGTH: usize = 5000;

/// Review fields supplied by the author.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub rating: i32,
    pub text: String,
    pub sentiment: Option<Sentiment>,
    pub is_spoiler: bool,
}

fn check_rating(rating: i32) -> DomainResult<()> {
    if !(1..=10).contains(&rating) {
        return Err(DomainError::Validation("rating must be between 1 and 10".into()));
    }
    Ok(())
}

fn check_text(text: &str) -> DomainResult<()> {
    let len = text.trim().chars().count();
    if len == 0 || len > MAX_REVIEW_LENGTH {
        return Err(DomainError::Validation(format!(
            "review text must be 1-{MAX_REVIEW_LENGTH} characters"
        )));
    }
    Ok(())
}

pub struct ReviewService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReviewService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create_review(
        &self,
        user_id: &str,
        movie_id: &str,
        draft: ReviewDraft,
    ) -> DomainResult<Review> {
        check_rating(draft.rating)?;
        check_text(&draft.text)?;

        if self.repos.movies().find_by_id(movie_id).await?.is_none() {
            return Err(DomainError::not_found("Movie", "id", movie_id));
        }

        let review = self
            .repos
            .reviews()
            .create(NewReview {
                movie_id: movie_id.to_string(),
                user_id: user_id.to_string(),
                rating: draft.rating,
                text: draft.text,
                sentiment: draft.sentiment,
                is_spoiler: draft.is_spoiler,
            })
            .await?;

        info!(review_id = %review.id, movie_id, user_id, "Review created");
        Ok(review)
    }

    /// Loads the review and checks that `user_id` wrote it.
    async fn owned(&self, user_id: &str, review_id: &str) -> DomainResult<Review> {
        let review = self
            .repos
            .reviews()
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review", "id", review_id))?;
        if review.user_id != user_id {
            return Err(DomainError::Forbidden("Only the author may change a review".into()));
        }
        Ok(review)
    }

    pub async fn update_review(
        &self,
        user_id: &str,
        review_id: &str,
        update: ReviewUpdate,
    ) -> DomainResult<Review> {
        if let Some(rating) = update.rating {
            check_rating(rating)?;
        }
        if let Some(text) = update.text.as_deref() {
            check_text(text)?;
        }
        self.owned(user_id, review_id).await?;

        self.repos
            .reviews()
            .update(review_id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("Review", "id", review_id))
    }

    pub async fn delete_review(&self, user_id: &str, review_id: &str) -> DomainResult<()> {
        self.owned(user_id, review_id).await?;
        if !self.repos.reviews().delete(review_id).await? {
            return Err(DomainError::not_found("Review", "id", review_id));
        }
        info!(review_id, user_id, "Review deleted");
        Ok(())
    }

    pub async fn vote_helpful(
        &self,
        user_id: &str,
        review_id: &str,
        is_helpful: bool,
    ) -> DomainResult<HelpfulVote> {
        if self.repos.reviews().find_by_id(review_id).await?.is_none() {
            return Err(DomainError::not_found("Review", "id", review_id));
        }
        self.repos
            .reviews()
            .upsert_vote(review_id, user_id, is_helpful)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::movie_repository::tests::new_movie;
    use crate::infrastructure::database::repositories::user_repository::tests::new_user;
    use crate::infrastructure::database::test_repositories;

    struct Fixture {
        service: ReviewService,
        movie_id: String,
        author: String,
        stranger: String,
    }

    async fn fixture() -> Fixture {
        let repos = test_repositories().await;
        let movie = repos
            .movies()
            .insert(new_movie("Oppenheimer", 2023, 8.4, &["Drama"]))
            .await
            .unwrap();
        let author = repos.users().create(new_user("author@example.com")).await.unwrap();
        let stranger = repos.users().create(new_user("stranger@example.com")).await.unwrap();
        Fixture {
            service: ReviewService::new(repos),
            movie_id: movie.id,
            author: author.id,
            stranger: stranger.id,
        }
    }

    fn draft(rating: i32, text: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            text: text.to_string(),
            sentiment: None,
            is_spoiler: false,
        }
    }

    #[tokio::test]
    async fn create_validates_rating_and_text() {
        let f = fixture().await;
        for bad in [draft(0, "ok"), draft(11, "ok"), draft(5, "  ")] {
            let err = f.service.create_review(&f.author, &f.movie_id, bad).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        let long = "x".repeat(MAX_REVIEW_LENGTH + 1);
        assert!(f.service.create_review(&f.author, &f.movie_id, draft(5, &long)).await.is_err());

        let review = f
            .service
            .create_review(&f.author, &f.movie_id, draft(7, "Gripping"))
            .await
            .unwrap();
        assert_eq!(review.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn review_for_unknown_movie_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .create_review(&f.author, "missing", draft(7, "?"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn only_the_author_may_change_a_review() {
        let f = fixture().await;
        let review = f
            .service
            .create_review(&f.author, &f.movie_id, draft(5, "Long"))
            .await
            .unwrap();

        let update = ReviewUpdate {
            rating: Some(9),
            ..Default::default()
        };
        let err = f
            .service
            .update_review(&f.stranger, &review.id, update.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(matches!(
            f.service.delete_review(&f.stranger, &review.id).await,
            Err(DomainError::Forbidden(_))
        ));

        let updated = f.service.update_review(&f.author, &review.id, update).await.unwrap();
        assert_eq!(updated.rating, 9);
        f.service.delete_review(&f.author, &review.id).await.unwrap();
        assert!(f
            .service
            .delete_review(&f.author, &review.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn anyone_may_vote() {
        let f = fixture().await;
        let review = f
            .service
            .create_review(&f.author, &f.movie_id, draft(8, "Great"))
            .await
            .unwrap();
        let vote = f.service.vote_helpful(&f.stranger, &review.id, true).await.unwrap();
        assert!(vote.is_helpful);
        assert!(f.service.vote_helpful(&f.stranger, "missing", true).await.is_err());
    }
}
