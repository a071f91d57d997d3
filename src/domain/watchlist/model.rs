//! Watchlist domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::movie::Movie;
use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[default]
    PlanToWatch,
    Watching,
    Completed,
    Dropped,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlanToWatch => "plan_to_watch",
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}

impl FromStr for WatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan_to_watch" => Ok(Self::PlanToWatch),
            "watching" => Ok(Self::Watching),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            other => Err(DomainError::Validation(format!("unknown watch status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistItem {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub status: WatchStatus,
    pub priority: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A watchlist row joined with its movie. `movie` is `None` if the movie
/// was removed from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistEntry {
    pub item: WatchlistItem,
    pub movie: Option<Movie>,
}

#[derive(Debug, Clone)]
pub struct NewWatchlistItem {
    pub user_id: String,
    pub movie_id: String,
    pub status: WatchStatus,
    pub priority: i32,
    pub notes: Option<String>,
}

impl NewWatchlistItem {
    pub fn new(user_id: impl Into<String>, movie_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            movie_id: movie_id.into(),
            status: WatchStatus::default(),
            priority: 0,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WatchlistUpdate {
    pub status: Option<WatchStatus>,
    pub priority: Option<i32>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl WatchlistUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_snake_case() {
        assert_eq!("plan_to_watch".parse::<WatchStatus>().unwrap(), WatchStatus::PlanToWatch);
        assert_eq!("dropped".parse::<WatchStatus>().unwrap(), WatchStatus::Dropped);
        assert!("later".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn new_item_defaults() {
        let item = NewWatchlistItem::new("u", "m");
        assert_eq!(item.status, WatchStatus::PlanToWatch);
        assert_eq!(item.priority, 0);
        assert!(item.notes.is_none());
    }

    #[test]
    fn empty_update() {
        assert!(WatchlistUpdate::default().is_empty());
        let clear_notes = WatchlistUpdate {
            notes: Some(None),
            ..Default::default()
        };
        assert!(!clear_notes.is_empty());
    }
}
