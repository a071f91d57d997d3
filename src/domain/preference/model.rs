//! Preference domain entity and recommendation scoring

use chrono::{DateTime, Utc};

use crate::domain::movie::Movie;

const GENRE_WEIGHT: f64 = 0.6;
const LANGUAGE_WEIGHT: f64 = 0.3;
const RATING_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct UserPreference {
    pub id: String,
    pub user_id: String,
    pub favorite_genres: Vec<String>,
    pub preferred_languages: Vec<String>,
    pub favorite_ott_services: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_runtime: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert shape, keyed by user.
#[derive(Debug, Clone, Default)]
pub struct PreferenceInput {
    pub favorite_genres: Vec<String>,
    pub preferred_languages: Vec<String>,
    pub favorite_ott_services: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_runtime: Option<i32>,
}

/// Row returned by the recommendation function.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    /// 0.0 – 1.0
    pub match_score: f64,
}

impl Recommendation {
    pub fn new(movie: &Movie, match_score: f64) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year,
            rating: movie.rating,
            poster_url: movie.poster_url.clone(),
            match_score,
        }
    }
}

/// Scores `movie` against the user's preferences, or `None` when the movie
/// falls outside the user's rating/runtime bounds.
///
/// An empty preference list (or no preferences at all) contributes its
/// full weight, so a user with no genres set still sees a ranking.
pub fn match_score(prefs: Option<&UserPreference>, movie: &Movie) -> Option<f64> {
    let rating = movie.rating.unwrap_or(0.0);

    let Some(prefs) = prefs else {
        return Some(GENRE_WEIGHT + LANGUAGE_WEIGHT + RATING_WEIGHT * rating / 10.0);
    };

    if let Some(min) = prefs.min_rating {
        if rating < min {
            return None;
        }
    }
    if let (Some(max), Some(runtime)) = (prefs.max_runtime, movie.runtime) {
        if runtime > max {
            return None;
        }
    }

    let genre_part = if prefs.favorite_genres.is_empty() {
        1.0
    } else {
        let matched = prefs
            .favorite_genres
            .iter()
            .filter(|g| movie.has_genre(g))
            .count();
        matched as f64 / prefs.favorite_genres.len() as f64
    };

    let language_part = if prefs.preferred_languages.is_empty()
        || prefs
            .preferred_languages
            .iter()
            .any(|l| movie.languages.contains(l))
    {
        1.0
    } else {
        0.0
    };

    Some(GENRE_WEIGHT * genre_part + LANGUAGE_WEIGHT * language_part + RATING_WEIGHT * rating / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::MovieStatus;

    fn movie(genres: &[&str], languages: &[&str], rating: f64, runtime: i32) -> Movie {
        Movie {
            id: "m".into(),
            title: "T".into(),
            year: 2024,
            runtime: Some(runtime),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            languages: languages.iter().map(|s| s.to_string()).collect(),
            backdrop_url: None,
            poster_url: None,
            trailer_youtube_id: None,
            rating: Some(rating),
            overview: None,
            cast: None,
            director: None,
            release_date: None,
            country: None,
            age_rating: None,
            status: MovieStatus::Released,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn prefs(genres: &[&str], languages: &[&str]) -> UserPreference {
        UserPreference {
            id: "p".into(),
            user_id: "u".into(),
            favorite_genres: genres.iter().map(|s| s.to_string()).collect(),
            preferred_languages: languages.iter().map(|s| s.to_string()).collect(),
            favorite_ott_services: vec![],
            min_rating: None,
            max_runtime: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn full_match_scores_near_one() {
        let p = prefs(&["Sci-Fi"], &["English"]);
        let score = match_score(Some(&p), &movie(&["Sci-Fi"], &["English"], 10.0, 120)).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_genre_match_is_proportional() {
        let p = prefs(&["Sci-Fi", "Drama"], &[]);
        let score = match_score(Some(&p), &movie(&["Sci-Fi"], &["French"], 0.0, 90)).unwrap();
        assert!((score - (0.3 + 0.3)).abs() < 1e-9);
    }

    #[test]
    fn bounds_exclude_movies() {
        let mut p = prefs(&[], &[]);
        p.min_rating = Some(8.0);
        p.max_runtime = Some(120);
        assert!(match_score(Some(&p), &movie(&[], &[], 7.9, 100)).is_none());
        assert!(match_score(Some(&p), &movie(&[], &[], 8.5, 121)).is_none());
        assert!(match_score(Some(&p), &movie(&[], &[], 8.0, 120)).is_some());
    }

    #[test]
    fn no_preferences_ranks_by_rating() {
        let high = match_score(None, &movie(&[], &[], 9.0, 100)).unwrap();
        let low = match_score(None, &movie(&[], &[], 5.0, 100)).unwrap();
        assert!(high > low);
    }
}
