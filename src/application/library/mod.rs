//! A user's own shelf: watchlist, preferences and recommendations.

pub mod service;

pub use service::{LibraryService, RECOMMENDATION_LIMIT};
