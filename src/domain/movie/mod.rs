//! Movie aggregate
//!
//! Contains the Movie entity, the filter/sort value objects used by the
//! catalog, and the repository interface.

pub mod filter;
pub mod model;
pub mod repository;

pub use filter::{FilterSet, MovieSort};
pub use model::{Movie, MovieStatus, MovieSummary, NewMovie};
pub use repository::MovieRepository;
