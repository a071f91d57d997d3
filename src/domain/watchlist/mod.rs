pub mod model;
pub mod repository;

pub use model::{NewWatchlistItem, WatchStatus, WatchlistEntry, WatchlistItem, WatchlistUpdate};
pub use repository::WatchlistRepository;
