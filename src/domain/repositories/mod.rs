//! Unified access to the per-aggregate repositories.

use super::movie::MovieRepository;
use super::preference::PreferenceRepository;
use super::review::ReviewRepository;
use super::user::UserRepository;
use super::watchlist::WatchlistRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let movie = repos.movies().find_by_id("m-1").await?;
///     let reviews = repos.reviews().all_for_movie("m-1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn movies(&self) -> &dyn MovieRepository;
    fn reviews(&self) -> &dyn ReviewRepository;
    fn users(&self) -> &dyn UserRepository;
    fn preferences(&self) -> &dyn PreferenceRepository;
    fn watchlist(&self) -> &dyn WatchlistRepository;
}
