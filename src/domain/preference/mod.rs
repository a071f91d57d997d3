//! Viewing preferences and the recommendations derived from them.

pub mod model;
pub mod repository;

pub use model::{match_score, PreferenceInput, Recommendation, UserPreference};
pub use repository::PreferenceRepository;
