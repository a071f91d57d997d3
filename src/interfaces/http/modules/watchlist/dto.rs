//! Watchlist DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewWatchlistItem, WatchStatus, WatchlistEntry, WatchlistItem, WatchlistUpdate};
use crate::interfaces::http::modules::movies::MovieDto;
use crate::shared::DomainResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct WatchlistItemDto {
    pub id: String,
    pub movie_id: String,
    /// plan_to_watch, watching, completed or dropped
    pub status: String,
    pub priority: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WatchlistItem> for WatchlistItemDto {
    fn from(i: WatchlistItem) -> Self {
        Self {
            status: i.status.as_str().to_string(),
            id: i.id,
            movie_id: i.movie_id,
            priority: i.priority,
            notes: i.notes,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WatchlistEntryDto {
    #[serde(flatten)]
    pub item: WatchlistItemDto,
    pub movie: Option<MovieDto>,
}

impl From<WatchlistEntry> for WatchlistEntryDto {
    fn from(e: WatchlistEntry) -> Self {
        Self {
            item: e.item.into(),
            movie: e.movie.map(MovieDto::from),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToWatchlistRequest {
    #[validate(length(min = 1, message = "movie_id is required"))]
    pub movie_id: String,
    /// Defaults to plan_to_watch
    pub status: Option<String>,
    /// Defaults to 0; higher sorts first
    pub priority: Option<i32>,
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

fn parse_status(raw: Option<&str>) -> DomainResult<Option<WatchStatus>> {
    raw.map(str::parse::<WatchStatus>).transpose()
}

impl AddToWatchlistRequest {
    pub fn into_item(self, user_id: &str) -> DomainResult<NewWatchlistItem> {
        let mut item = NewWatchlistItem::new(user_id, self.movie_id);
        if let Some(status) = parse_status(self.status.as_deref())? {
            item.status = status;
        }
        item.priority = self.priority.unwrap_or(0);
        item.notes = self.notes;
        Ok(item)
    }
}

/// Distinguishes `"notes": null` (clear) from an absent field (keep).
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWatchlistRequest {
    pub status: Option<String>,
    pub priority: Option<i32>,
    /// `null` clears the notes
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl TryFrom<UpdateWatchlistRequest> for WatchlistUpdate {
    type Error = crate::shared::DomainError;

    fn try_from(r: UpdateWatchlistRequest) -> DomainResult<Self> {
        Ok(Self {
            status: parse_status(r.status.as_deref())?,
            priority: r.priority,
            notes: r.notes,
        })
    }
}
