pub mod auth;
pub mod dashboard;
pub mod health;
pub mod me;
pub mod metrics;
pub mod movies;
pub mod preferences;
pub mod request_id;
pub mod reviews;
pub mod watchlist;
