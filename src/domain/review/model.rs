//! Review domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Mixed,
    Negative,
}

impl Sentiment {
    /// Default sentiment for a 1–10 rating when the author gives none.
    pub fn from_rating(rating: i32) -> Self {
        match rating {
            r if r >= 7 => Self::Positive,
            r if r >= 4 => Self::Mixed,
            _ => Self::Negative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Mixed => "mixed",
            Self::Negative => "negative",
        }
    }
}

impl FromStr for Sentiment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "mixed" => Ok(Self::Mixed),
            "negative" => Ok(Self::Negative),
            other => Err(DomainError::Validation(format!("unknown sentiment: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub movie_id: String,
    pub user_id: String,
    /// 1 – 10
    pub rating: i32,
    pub text: String,
    pub sentiment: Sentiment,
    pub is_spoiler: bool,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public part of a user, copied onto each review.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithAuthor {
    pub review: Review,
    /// `None` when the author row is gone.
    pub author: Option<UserSummary>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub movie_id: String,
    pub user_id: String,
    pub rating: i32,
    pub text: String,
    pub sentiment: Option<Sentiment>,
    pub is_spoiler: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub text: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub is_spoiler: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HelpfulVote {
    pub id: String,
    pub review_id: String,
    pub user_id: String,
    pub is_helpful: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_from_rating_thresholds() {
        assert_eq!(Sentiment::from_rating(10), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(7), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(6), Sentiment::Mixed);
        assert_eq!(Sentiment::from_rating(4), Sentiment::Mixed);
        assert_eq!(Sentiment::from_rating(3), Sentiment::Negative);
    }

    #[test]
    fn sentiment_parse_is_case_insensitive() {
        assert_eq!("Mixed".parse::<Sentiment>().unwrap(), Sentiment::Mixed);
        assert!("meh".parse::<Sentiment>().is_err());
    }
}
