use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{
    DomainError, DomainResult, HelpfulVote, NewReview, Review, ReviewRepository, ReviewUpdate,
    ReviewWithAuthor, Sentiment,
};
use crate::infrastructure::database::entities::{helpful_vote, review, user};
use crate::shared::PageWindow;

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn sentiment_to_domain(sentiment: review::Sentiment) -> Sentiment {
    match sentiment {
        review::Sentiment::Positive => Sentiment::Positive,
        review::Sentiment::Mixed => Sentiment::Mixed,
        review::Sentiment::Negative => Sentiment::Negative,
    }
}

fn sentiment_to_entity(sentiment: Sentiment) -> review::Sentiment {
    match sentiment {
        Sentiment::Positive => review::Sentiment::Positive,
        Sentiment::Mixed => review::Sentiment::Mixed,
        Sentiment::Negative => review::Sentiment::Negative,
    }
}

fn review_model_to_domain(model: review::Model) -> Review {
    Review {
        id: model.id,
        movie_id: model.movie_id,
        user_id: model.user_id,
        rating: model.rating,
        text: model.text,
        sentiment: sentiment_to_domain(model.sentiment),
        is_spoiler: model.is_spoiler,
        helpful_count: model.helpful_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn with_author((review, author): (review::Model, Option<user::Model>)) -> ReviewWithAuthor {
    ReviewWithAuthor {
        review: review_model_to_domain(review),
        author: author.map(|u| super::user_repository::user_model_to_domain(u).summary()),
    }
}

fn vote_model_to_domain(model: helpful_vote::Model) -> HelpfulVote {
    HelpfulVote {
        id: model.id,
        review_id: model.review_id,
        user_id: model.user_id,
        is_helpful: model.is_helpful,
        created_at: model.created_at,
    }
}

fn newest_for_movie(movie_id: &str) -> Select<review::Entity> {
    review::Entity::find()
        .filter(review::Column::MovieId.eq(movie_id))
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn for_movie(
        &self,
        movie_id: &str,
        window: PageWindow,
    ) -> DomainResult<(Vec<ReviewWithAuthor>, u64)> {
        let total = newest_for_movie(movie_id).count(&self.db).await?;
        let rows = newest_for_movie(movie_id)
            .offset(window.offset)
            .limit(window.limit)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        Ok((rows.into_iter().map(with_author).collect(), total))
    }

    async fn all_for_movie(&self, movie_id: &str) -> DomainResult<Vec<ReviewWithAuthor>> {
        let rows = newest_for_movie(movie_id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(with_author).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Review>> {
        let model = review::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(review_model_to_domain))
    }

    async fn create(&self, new: NewReview) -> DomainResult<Review> {
        let now = Utc::now();
        let sentiment = new
            .sentiment
            .unwrap_or_else(|| Sentiment::from_rating(new.rating));

        let model = review::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            movie_id: Set(new.movie_id),
            user_id: Set(new.user_id),
            rating: Set(new.rating),
            text: Set(new.text),
            sentiment: Set(sentiment_to_entity(sentiment)),
            is_spoiler: Set(new.is_spoiler),
            helpful_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(review_model_to_domain(model))
    }

    async fn update(&self, id: &str, update: ReviewUpdate) -> DomainResult<Option<Review>> {
        let Some(existing) = review::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: review::ActiveModel = existing.into();
        if let Some(rating) = update.rating {
            active.rating = Set(rating);
        }
        if let Some(text) = update.text {
            active.text = Set(text);
        }
        if let Some(sentiment) = update.sentiment {
            active.sentiment = Set(sentiment_to_entity(sentiment));
        }
        if let Some(is_spoiler) = update.is_spoiler {
            active.is_spoiler = Set(is_spoiler);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(review_model_to_domain(updated)))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = review::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn upsert_vote(
        &self,
        review_id: &str,
        user_id: &str,
        is_helpful: bool,
    ) -> DomainResult<HelpfulVote> {
        let vote = helpful_vote::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            review_id: Set(review_id.to_string()),
            user_id: Set(user_id.to_string()),
            is_helpful: Set(is_helpful),
            created_at: Set(Utc::now()),
        };

        helpful_vote::Entity::insert(vote)
            .on_conflict(
                OnConflict::columns([helpful_vote::Column::ReviewId, helpful_vote::Column::UserId])
                    .update_column(helpful_vote::Column::IsHelpful)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        helpful_vote::Entity::find()
            .filter(helpful_vote::Column::ReviewId.eq(review_id))
            .filter(helpful_vote::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .map(vote_model_to_domain)
            .ok_or_else(|| DomainError::not_found("HelpfulVote", "review_id", review_id))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{MovieRepository, UserRepository};
    use crate::infrastructure::database::repositories::movie_repository::{
        tests::new_movie, SeaOrmMovieRepository,
    };
    use crate::infrastructure::database::repositories::user_repository::{
        tests::new_user, SeaOrmUserRepository,
    };
    use crate::infrastructure::database::test_database;

    struct Fixture {
        reviews: SeaOrmReviewRepository,
        users: SeaOrmUserRepository,
        movie_id: String,
        user_id: String,
    }

    async fn fixture() -> Fixture {
        let db = test_database().await;
        let movies = SeaOrmMovieRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db.clone());
        let movie = movies
            .insert(new_movie("Dune: Part Two", 2024, 8.8, &["Sci-Fi"]))
            .await
            .unwrap();
        let user = users.create(new_user("critic@example.com")).await.unwrap();
        Fixture {
            reviews: SeaOrmReviewRepository::new(db),
            users,
            movie_id: movie.id,
            user_id: user.id,
        }
    }

    fn new_review(f: &Fixture, rating: i32, text: &str) -> NewReview {
        NewReview {
            movie_id: f.movie_id.clone(),
            user_id: f.user_id.clone(),
            rating,
            text: text.to_string(),
            sentiment: None,
            is_spoiler: false,
        }
    }

    #[tokio::test]
    async fn create_defaults_sentiment_from_rating() {
        let f = fixture().await;
        let review = f.reviews.create(new_review(&f, 3, "Slow")).await.unwrap();
        assert_eq!(review.sentiment, Sentiment::Negative);
        assert_eq!(review.helpful_count, 0);
    }

    #[tokio::test]
    async fn for_movie_is_newest_first_with_author() {
        let f = fixture().await;
        for text in ["first", "second", "third"] {
            f.reviews.create(new_review(&f, 8, text)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let (page, total) = f
            .reviews
            .for_movie(&f.movie_id, PageWindow { offset: 0, limit: 2 })
            .await
            .unwrap();
        assert_eq!(total, 3);
        let texts: Vec<_> = page.iter().map(|r| r.review.text.as_str()).collect();
        assert_eq!(texts, ["third", "second"]);
        assert_eq!(page[0].author.as_ref().unwrap().name, "Film Fan");
    }

    #[tokio::test]
    async fn update_and_delete() {
        let f = fixture().await;
        let review = f.reviews.create(new_review(&f, 8, "Great")).await.unwrap();

        let updated = f
            .reviews
            .update(
                &review.id,
                ReviewUpdate {
                    text: Some("Still great".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "Still great");
        assert_eq!(updated.rating, 8);

        assert!(f.reviews.delete(&review.id).await.unwrap());
        assert!(!f.reviews.delete(&review.id).await.unwrap());
        assert!(f.reviews.find_by_id(&review.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn vote_upserts_per_user() {
        let f = fixture().await;
        let review = f.reviews.create(new_review(&f, 9, "Loved it")).await.unwrap();
        let voter = f.users.create(new_user("voter@example.com")).await.unwrap();

        let first = f.reviews.upsert_vote(&review.id, &voter.id, true).await.unwrap();
        let second = f.reviews.upsert_vote(&review.id, &voter.id, false).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(!second.is_helpful);
    }
}
