//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::movie::MovieRepository;
use crate::domain::preference::PreferenceRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::review::ReviewRepository;
use crate::domain::user::UserRepository;
use crate::domain::watchlist::WatchlistRepository;

use super::movie_repository::SeaOrmMovieRepository;
use super::preference_repository::SeaOrmPreferenceRepository;
use super::review_repository::SeaOrmReviewRepository;
use super::user_repository::SeaOrmUserRepository;
use super::watchlist_repository::SeaOrmWatchlistRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let movie = repos.movies().find_by_id(&id).await?;
/// let recs = repos.preferences().recommendations(&user_id, 20).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    movies: SeaOrmMovieRepository,
    reviews: SeaOrmReviewRepository,
    users: SeaOrmUserRepository,
    preferences: SeaOrmPreferenceRepository,
    watchlist: SeaOrmWatchlistRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            movies: SeaOrmMovieRepository::new(db.clone()),
            reviews: SeaOrmReviewRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            preferences: SeaOrmPreferenceRepository::new(db.clone()),
            watchlist: SeaOrmWatchlistRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn movies(&self) -> &dyn MovieRepository {
        &self.movies
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        &self.reviews
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn preferences(&self) -> &dyn PreferenceRepository {
        &self.preferences
    }

    fn watchlist(&self) -> &dyn WatchlistRepository {
        &self.watchlist
    }
}
