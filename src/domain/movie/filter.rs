//! Catalog filter and sort value objects.
//!
//! A [`FilterSet`] is built once from request parameters and handed to a
//! single repository query; it carries no builder state of its own.

use std::str::FromStr;

use crate::shared::{DomainError, DomainResult};

/// Conjunctive predicates over released movies. Empty lists and `None`
/// mean the predicate is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Matches when the movie's genres intersect this set.
    pub genres: Vec<String>,
    /// Matches when the movie's languages intersect this set.
    pub languages: Vec<String>,
    /// Inclusive lower bound: `rating >= min_rating`.
    pub min_rating: Option<f64>,
    /// Inclusive upper bound: `runtime <= max_runtime`.
    pub max_runtime: Option<i32>,
}

impl FilterSet {
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_max_runtime(mut self, max_runtime: i32) -> Self {
        self.max_runtime = Some(max_runtime);
        self
    }

    /// Parses a comma-separated list, dropping blanks.
    pub fn split_list(raw: Option<&str>) -> Vec<String> {
        raw.map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.languages.is_empty()
            && self.min_rating.is_none()
            && self.max_runtime.is_none()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(min) = self.min_rating {
            if !(0.0..=10.0).contains(&min) {
                return Err(DomainError::Validation(
                    "min_rating must be between 0 and 10".into(),
                ));
            }
        }
        if let Some(max) = self.max_runtime {
            if max <= 0 {
                return Err(DomainError::Validation("max_runtime must be > 0".into()));
            }
        }
        Ok(())
    }
}

/// Listing order. Every variant breaks ties on id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSort {
    #[default]
    RatingDesc,
    RatingAsc,
    /// Most recent release year first
    Newest,
    TitleAsc,
}

impl FromStr for MovieSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating_desc" | "rating" => Ok(Self::RatingDesc),
            "rating_asc" => Ok(Self::RatingAsc),
            "newest" => Ok(Self::Newest),
            "title" => Ok(Self::TitleAsc),
            other => Err(DomainError::Validation(format!("unknown sort: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(
            FilterSet::split_list(Some("Sci-Fi, Drama,,")),
            vec!["Sci-Fi".to_string(), "Drama".to_string()]
        );
        assert!(FilterSet::split_list(None).is_empty());
    }

    #[test]
    fn validate_rejects_out_of_domain_bounds() {
        assert!(FilterSet::default().with_min_rating(11.0).validate().is_err());
        assert!(FilterSet::default().with_min_rating(-0.5).validate().is_err());
        assert!(FilterSet::default().with_max_runtime(0).validate().is_err());
        assert!(FilterSet::default()
            .with_min_rating(8.0)
            .with_max_runtime(150)
            .validate()
            .is_ok());
    }

    #[test]
    fn sort_parses_known_names() {
        assert_eq!("newest".parse::<MovieSort>().unwrap(), MovieSort::Newest);
        assert_eq!("rating".parse::<MovieSort>().unwrap(), MovieSort::RatingDesc);
        assert!("popularity".parse::<MovieSort>().is_err());
    }

    #[test]
    fn empty_filter_set() {
        assert!(FilterSet::default().is_empty());
        assert!(!FilterSet::default().with_genres(["Sci-Fi"]).is_empty());
    }
}
