//! Review aggregate
//!
//! Reviews, their denormalized author summary and helpfulness votes.

pub mod model;
pub mod repository;

pub use model::{HelpfulVote, NewReview, Review, ReviewUpdate, ReviewWithAuthor, Sentiment, UserSummary};
pub use repository::ReviewRepository;
