pub mod service;

pub use service::{ReviewDraft, ReviewService, MAX_REVIEW_LENGTH};
