//! Read side of the movie catalog.

pub mod service;

pub use service::{CatalogService, MovieDetail, DEFAULT_MOVIE_LIMIT, DEFAULT_REVIEW_LIMIT};
