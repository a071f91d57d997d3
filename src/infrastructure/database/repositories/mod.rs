//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod movie_repository;
pub mod preference_repository;
pub mod repository_provider;
pub mod review_repository;
pub mod user_repository;
pub mod watchlist_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
