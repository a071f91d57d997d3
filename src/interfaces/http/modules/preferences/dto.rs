//! Preference and recommendation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{PreferenceInput, Recommendation, UserPreference};

#[derive(Debug, Serialize, ToSchema)]
pub struct PreferenceDto {
    pub favorite_genres: Vec<String>,
    pub preferred_languages: Vec<String>,
    pub favorite_ott_services: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_runtime: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserPreference> for PreferenceDto {
    fn from(p: UserPreference) -> Self {
        Self {
            favorite_genres: p.favorite_genres,
            preferred_languages: p.preferred_languages,
            favorite_ott_services: p.favorite_ott_services,
            min_rating: p.min_rating,
            max_runtime: p.max_runtime,
            updated_at: p.updated_at,
        }
    }
}

/// Replaces the stored preferences as a whole.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PreferenceRequest {
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    #[serde(default)]
    pub favorite_ott_services: Vec<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "min_rating must be between 0 and 10"))]
    pub min_rating: Option<f64>,
    #[validate(range(min = 1, message = "max_runtime must be > 0"))]
    pub max_runtime: Option<i32>,
}

fn clean(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim().to_string();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

impl From<PreferenceRequest> for PreferenceInput {
    fn from(r: PreferenceRequest) -> Self {
        Self {
            favorite_genres: clean(r.favorite_genres),
            preferred_languages: clean(r.preferred_languages),
            favorite_ott_services: clean(r.favorite_ott_services),
            min_rating: r.min_rating,
            max_runtime: r.max_runtime,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationDto {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    /// 0.0 to 1.0
    pub match_score: f64,
}

impl From<Recommendation> for RecommendationDto {
    fn from(r: Recommendation) -> Self {
        Self {
            id: r.id,
            title: r.title,
            year: r.year,
            rating: r.rating,
            poster_url: r.poster_url,
            match_score: r.match_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_and_dedups_lists() {
        let req: PreferenceRequest = serde_json::from_str(
            r#"{"favorite_genres": ["Drama", " Drama ", "", "Thriller"], "min_rating": 7}"#,
        )
        .unwrap();
        let input = PreferenceInput::from(req);
        assert_eq!(input.favorite_genres, vec!["Drama", "Thriller"]);
        assert!(input.preferred_languages.is_empty());
        assert_eq!(input.min_rating, Some(7.0));
    }
}
