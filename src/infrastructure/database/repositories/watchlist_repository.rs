use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainResult, NewWatchlistItem, WatchStatus, WatchlistEntry, WatchlistItem,
    WatchlistRepository, WatchlistUpdate,
};
use crate::infrastructure::database::entities::{movie, watchlist};

use super::movie_repository::movie_model_to_domain;
use super::user_repository::conflict_or_upstream;

pub struct SeaOrmWatchlistRepository {
    db: DatabaseConnection,
}

impl SeaOrmWatchlistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: watchlist::WatchStatus) -> WatchStatus {
    match status {
        watchlist::WatchStatus::PlanToWatch => WatchStatus::PlanToWatch,
        watchlist::WatchStatus::Watching => WatchStatus::Watching,
        watchlist::WatchStatus::Completed => WatchStatus::Completed,
        watchlist::WatchStatus::Dropped => WatchStatus::Dropped,
    }
}

fn status_to_entity(status: WatchStatus) -> watchlist::WatchStatus {
    match status {
        WatchStatus::PlanToWatch => watchlist::WatchStatus::PlanToWatch,
        WatchStatus::Watching => watchlist::WatchStatus::Watching,
        WatchStatus::Completed => watchlist::WatchStatus::Completed,
        WatchStatus::Dropped => watchlist::WatchStatus::Dropped,
    }
}

fn item_model_to_domain(model: watchlist::Model) -> WatchlistItem {
    WatchlistItem {
        id: model.id,
        user_id: model.user_id,
        movie_id: model.movie_id,
        status: status_to_domain(model.status),
        priority: model.priority,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl WatchlistRepository for SeaOrmWatchlistRepository {
    async fn add(&self, new: NewWatchlistItem) -> DomainResult<WatchlistItem> {
        let now = Utc::now();
        let model = watchlist::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(new.user_id),
            movie_id: Set(new.movie_id),
            status: Set(status_to_entity(new.status)),
            priority: Set(new.priority),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_upstream(e, "Movie is already on the watchlist"))?;

        Ok(item_model_to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WatchlistItem>> {
        let model = watchlist::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(item_model_to_domain))
    }

    async fn update(&self, id: &str, update: WatchlistUpdate) -> DomainResult<Option<WatchlistItem>> {
        let Some(existing) = watchlist::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: watchlist::ActiveModel = existing.into();
        if let Some(status) = update.status {
            active.status = Set(status_to_entity(status));
        }
        if let Some(priority) = update.priority {
            active.priority = Set(priority);
        }
        if let Some(notes) = update.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(item_model_to_domain(updated)))
    }

    async fn remove(&self, user_id: &str, movie_id: &str) -> DomainResult<u64> {
        let result = watchlist::Entity::delete_many()
            .filter(watchlist::Column::UserId.eq(user_id))
            .filter(watchlist::Column::MovieId.eq(movie_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn for_user(&self, user_id: &str) -> DomainResult<Vec<WatchlistEntry>> {
        let rows = watchlist::Entity::find()
            .filter(watchlist::Column::UserId.eq(user_id))
            .order_by_desc(watchlist::Column::Priority)
            .order_by_desc(watchlist::Column::CreatedAt)
            .find_also_related(movie::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(item, movie)| WatchlistEntry {
                item: item_model_to_domain(item),
                movie: movie.map(movie_model_to_domain),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{DomainError, MovieRepository, UserRepository};
    use crate::infrastructure::database::repositories::movie_repository::{
        tests::new_movie, SeaOrmMovieRepository,
    };
    use crate::infrastructure::database::repositories::user_repository::{
        tests::new_user, SeaOrmUserRepository,
    };
    use crate::infrastructure::database::test_database;

    async fn fixture() -> (SeaOrmWatchlistRepository, String, Vec<String>) {
        let db = test_database().await;
        let movies = SeaOrmMovieRepository::new(db.clone());
        let mut ids = Vec::new();
        for (title, year) in [("Dune: Part Two", 2024), ("Oppenheimer", 2023), ("The Batman", 2022)] {
            ids.push(movies.insert(new_movie(title, year, 8.0, &["Drama"])).await.unwrap().id);
        }
        let user = SeaOrmUserRepository::new(db.clone())
            .create(new_user("fan@example.com"))
            .await
            .unwrap();
        (SeaOrmWatchlistRepository::new(db), user.id, ids)
    }

    #[tokio::test]
    async fn adding_twice_is_a_conflict() {
        let (repo, user_id, movies) = fixture().await;
        let item = repo.add(NewWatchlistItem::new(&user_id, &movies[0])).await.unwrap();
        assert_eq!(item.status, WatchStatus::PlanToWatch);

        let err = repo
            .add(NewWatchlistItem::new(&user_id, &movies[0]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn listing_orders_by_priority_then_newest() {
        let (repo, user_id, movies) = fixture().await;
        repo.add(NewWatchlistItem::new(&user_id, &movies[0])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.add(NewWatchlistItem::new(&user_id, &movies[1])).await.unwrap();
        repo.add(NewWatchlistItem {
            priority: 5,
            ..NewWatchlistItem::new(&user_id, &movies[2])
        })
        .await
        .unwrap();

        let entries = repo.for_user(&user_id).await.unwrap();
        let titles: Vec<_> = entries
            .iter()
            .map(|e| e.movie.as_ref().unwrap().title.as_str())
            .collect();
        assert_eq!(titles, ["The Batman", "Oppenheimer", "Dune: Part Two"]);
    }

    #[tokio::test]
    async fn update_and_remove() {
        let (repo, user_id, movies) = fixture().await;
        let item = repo.add(NewWatchlistItem::new(&user_id, &movies[0])).await.unwrap();

        let updated = repo
            .update(
                &item.id,
                WatchlistUpdate {
                    status: Some(WatchStatus::Completed),
                    notes: Some(Some("Rewatch in IMAX".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, WatchStatus::Completed);
        assert_eq!(updated.notes.as_deref(), Some("Rewatch in IMAX"));

        assert_eq!(repo.remove(&user_id, &movies[0]).await.unwrap(), 1);
        assert_eq!(repo.remove(&user_id, &movies[0]).await.unwrap(), 0);
    }
}
