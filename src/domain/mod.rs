//! Domain layer: entities, value objects and repository interfaces.
//!
//! Each aggregate lives in its own module with its model and the
//! repository trait the infrastructure layer implements.

pub mod carousel;
pub mod movie;
pub mod ott;
pub mod preference;
pub mod repositories;
pub mod review;
pub mod user;
pub mod watchlist;

pub use carousel::{CarouselItem, RotationController, RotationError, RotationState};
pub use movie::{FilterSet, Movie, MovieRepository, MovieSort, MovieStatus, MovieSummary, NewMovie};
pub use ott::{OttAvailability, OttService, OttServiceType, VideoQuality};
pub use preference::{PreferenceInput, PreferenceRepository, Recommendation, UserPreference};
pub use repositories::RepositoryProvider;
pub use review::{
    HelpfulVote, NewReview, Review, ReviewRepository, ReviewUpdate, ReviewWithAuthor, Sentiment,
    UserSummary,
};
pub use user::{NewUser, ProfileUpdate, User, UserRepository};
pub use watchlist::{
    NewWatchlistItem, WatchStatus, WatchlistEntry, WatchlistItem, WatchlistRepository,
    WatchlistUpdate,
};

pub use crate::shared::errors::{DomainError, DomainResult};
