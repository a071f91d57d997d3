//! Movie domain entity

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Release status; only `Released` movies are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieStatus {
    #[default]
    Released,
    Upcoming,
    Cancelled,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Upcoming => "upcoming",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "released" => Ok(Self::Released),
            "upcoming" => Ok(Self::Upcoming),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!("unknown movie status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    /// Minutes
    pub runtime: Option<i32>,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_youtube_id: Option<String>,
    /// 0.0 – 10.0
    pub rating: Option<f64>,
    pub overview: Option<String>,
    pub cast: Option<serde_json::Value>,
    pub director: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub age_rating: Option<String>,
    pub status: MovieStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year,
            rating: self.rating,
            poster_url: self.poster_url.clone(),
        }
    }
}

/// Compact row returned by the genre lookup function.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
}

/// Insert shape for the movies table.
#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub runtime: Option<i32>,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_youtube_id: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
    pub cast: Option<serde_json::Value>,
    pub director: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub age_rating: Option<String>,
    pub status: MovieStatus,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
            ..Default::default()
        }
    }
}
