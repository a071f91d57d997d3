//! Review write DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ReviewDraft;
use crate::domain::{HelpfulVote, ReviewUpdate, Sentiment};
use crate::shared::DomainResult;

fn parse_sentiment(raw: Option<&str>) -> DomainResult<Option<Sentiment>> {
    raw.map(str::parse::<Sentiment>).transpose()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "movie_id is required"))]
    pub movie_id: String,
    #[validate(range(min = 1, max = 10, message = "rating must be between 1 and 10"))]
    pub rating: i32,
    #[validate(length(min = 1, max = 5000, message = "text must be 1-5000 characters"))]
    pub text: String,
    /// positive, mixed or negative; derived from the rating when omitted
    pub sentiment: Option<String>,
    #[serde(default)]
    pub is_spoiler: bool,
}

impl CreateReviewRequest {
    pub fn into_draft(self) -> DomainResult<(String, ReviewDraft)> {
        let sentiment = parse_sentiment(self.sentiment.as_deref())?;
        Ok((
            self.movie_id,
            ReviewDraft {
                rating: self.rating,
                text: self.text,
                sentiment,
                is_spoiler: self.is_spoiler,
            },
        ))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 10, message = "rating must be between 1 and 10"))]
    pub rating: Option<i32>,
    #[validate(length(min = 1, max = 5000, message = "text must be 1-5000 characters"))]
    pub text: Option<String>,
    pub sentiment: Option<String>,
    pub is_spoiler: Option<bool>,
}

impl TryFrom<UpdateReviewRequest> for ReviewUpdate {
    type Error = crate::shared::DomainError;

    fn try_from(r: UpdateReviewRequest) -> DomainResult<Self> {
        Ok(Self {
            sentiment: parse_sentiment(r.sentiment.as_deref())?,
            rating: r.rating,
            text: r.text,
            is_spoiler: r.is_spoiler,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HelpfulVoteRequest {
    #[serde(default = "default_helpful")]
    pub is_helpful: bool,
}

fn default_helpful() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HelpfulVoteDto {
    pub id: String,
    pub review_id: String,
    pub user_id: String,
    pub is_helpful: bool,
    pub created_at: DateTime<Utc>,
}

impl From<HelpfulVote> for HelpfulVoteDto {
    fn from(v: HelpfulVote) -> Self {
        Self {
            id: v.id,
            review_id: v.review_id,
            user_id: v.user_id,
            is_helpful: v.is_helpful,
            created_at: v.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_keeps_explicit_sentiment() {
        let req = CreateReviewRequest {
            movie_id: "m-1".into(),
            rating: 3,
            text: "Oddly moving".into(),
            sentiment: Some("positive".into()),
            is_spoiler: false,
        };
        let (movie_id, draft) = req.into_draft().unwrap();
        assert_eq!(movie_id, "m-1");
        assert_eq!(draft.sentiment, Some(Sentiment::Positive));
    }

    #[test]
    fn unknown_sentiment_is_a_validation_error() {
        let req = UpdateReviewRequest {
            rating: None,
            text: None,
            sentiment: Some("ecstatic".into()),
            is_spoiler: None,
        };
        assert!(ReviewUpdate::try_from(req).is_err());
    }

    #[test]
    fn helpful_defaults_to_true() {
        let req: HelpfulVoteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_helpful);
    }
}
