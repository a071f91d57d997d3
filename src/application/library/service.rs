use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewWatchlistItem, PreferenceInput, Recommendation,
    RepositoryProvider, UserPreference, WatchlistEntry, WatchlistItem, WatchlistUpdate,
};

pub const RECOMMENDATION_LIMIT: usize = 20;

pub struct LibraryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LibraryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Watchlist ───────────────────────────────────────────────

    pub async fn add_to_watchlist(&self, item: NewWatchlistItem) -> DomainResult<WatchlistItem> {
        if self.repos.movies().find_by_id(&item.movie_id).await?.is_none() {
            return Err(DomainError::not_found("Movie", "id", item.movie_id));
        }
        let added = self.repos.watchlist().add(item).await?;
        info!(user_id = %added.user_id, movie_id = %added.movie_id, "Added to watchlist");
        Ok(added)
    }

    pub async fn update_watchlist_item(
        &self,
        user_id: &str,
        item_id: &str,
        update: WatchlistUpdate,
    ) -> DomainResult<WatchlistItem> {
        let item = self
            .repos
            .watchlist()
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("WatchlistItem", "id", item_id))?;
        if item.user_id != user_id {
            return Err(DomainError::Forbidden("Watchlist item belongs to another user".into()));
        }
        if update.is_empty() {
            return Ok(item);
        }
        self.repos
            .watchlist()
            .update(item_id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("WatchlistItem", "id", item_id))
    }

    pub async fn remove_from_watchlist(&self, user_id: &str, movie_id: &str) -> DomainResult<()> {
        if self.repos.watchlist().remove(user_id, movie_id).await? == 0 {
            return Err(DomainError::not_found("WatchlistItem", "movie_id", movie_id));
        }
        Ok(())
    }

    pub async fn get_user_watchlist(&self, user_id: &str) -> DomainResult<Vec<WatchlistEntry>> {
        self.repos.watchlist().for_user(user_id).await
    }

    // ── Preferences ─────────────────────────────────────────────

    pub async fn get_user_preferences(&self, user_id: &str) -> DomainResult<Option<UserPreference>> {
        self.repos.preferences().find_for_user(user_id).await
    }

    pub async fn upsert_user_preferences(
        &self,
        user_id: &str,
        input: PreferenceInput,
    ) -> DomainResult<UserPreference> {
        if let Some(min) = input.min_rating {
            if !(0.0..=10.0).contains(&min) {
                return Err(DomainError::Validation("min_rating must be between 0 and 10".into()));
            }
        }
        if input.max_runtime.is_some_and(|m| m <= 0) {
            return Err(DomainError::Validation("max_runtime must be > 0".into()));
        }
        self.repos.preferences().upsert(user_id, input).await
    }

    pub async fn get_user_recommendations(&self, user_id: &str) -> DomainResult<Vec<Recommendation>> {
        self.repos
            .preferences()
            .recommendations(user_id, RECOMMENDATION_LIMIT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchStatus;
    use crate::infrastructure::database::repositories::movie_repository::tests::new_movie;
    use crate::infrastructure::database::repositories::user_repository::tests::new_user;
    use crate::infrastructure::database::test_repositories;

    async fn fixture() -> (LibraryService, String, String, String) {
        let repos = test_repositories().await;
        let movie = repos
            .movies()
            .insert(new_movie("Inception", 2010, 8.8, &["Sci-Fi"]))
            .await
            .unwrap();
        let owner = repos.users().create(new_user("owner@example.com")).await.unwrap();
        let other = repos.users().create(new_user("other@example.com")).await.unwrap();
        (LibraryService::new(repos), movie.id, owner.id, other.id)
    }

    #[tokio::test]
    async fn watchlist_lifecycle() {
        let (library, movie_id, owner, other) = fixture().await;
        let item = library
            .add_to_watchlist(NewWatchlistItem::new(&owner, &movie_id))
            .await
            .unwrap();

        let update = WatchlistUpdate {
            status: Some(WatchStatus::Watching),
            ..Default::default()
        };
        assert!(matches!(
            library.update_watchlist_item(&other, &item.id, update.clone()).await,
            Err(DomainError::Forbidden(_))
        ));
        let updated = library.update_watchlist_item(&owner, &item.id, update).await.unwrap();
        assert_eq!(updated.status, WatchStatus::Watching);

        let entries = library.get_user_watchlist(&owner).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(library.get_user_watchlist(&other).await.unwrap().is_empty());

        library.remove_from_watchlist(&owner, &movie_id).await.unwrap();
        assert!(library
            .remove_from_watchlist(&owner, &movie_id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn unknown_movie_cannot_be_added() {
        let (library, _, owner, _) = fixture().await;
        let err = library
            .add_to_watchlist(NewWatchlistItem::new(&owner, "missing"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn preferences_are_optional_and_validated() {
        let (library, _, owner, _) = fixture().await;
        assert!(library.get_user_preferences(&owner).await.unwrap().is_none());

        let bad = PreferenceInput {
            min_rating: Some(10.5),
            ..Default::default()
        };
        assert!(matches!(
            library.upsert_user_preferences(&owner, bad).await,
            Err(DomainError::Validation(_))
        ));

        library
            .upsert_user_preferences(
                &owner,
                PreferenceInput {
                    favorite_genres: vec!["Sci-Fi".into()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let recs = library.get_user_recommendations(&owner).await.unwrap();
        assert_eq!(recs[0].title, "Inception");
    }
}
