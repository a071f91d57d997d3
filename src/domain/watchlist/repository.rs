use async_trait::async_trait;

use super::{NewWatchlistItem, WatchlistEntry, WatchlistItem, WatchlistUpdate};
use crate::shared::DomainResult;

#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    /// Conflict when the movie is already on the user's list.
    async fn add(&self, item: NewWatchlistItem) -> DomainResult<WatchlistItem>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WatchlistItem>>;
    async fn update(&self, id: &str, update: WatchlistUpdate) -> DomainResult<Option<WatchlistItem>>;
    /// Returns the number of rows removed.
    async fn remove(&self, user_id: &str, movie_id: &str) -> DomainResult<u64>;
    /// Highest priority first, then newest.
    async fn for_user(&self, user_id: &str) -> DomainResult<Vec<WatchlistEntry>>;
}
