//! Hero carousel: item shape and rotation arithmetic.

pub mod rotation;

use serde::Serialize;

use super::movie::Movie;

pub use rotation::{RotationController, RotationError, RotationState};

/// One slide of the carousel. Owned by the caller; the controller only
/// ever sees the item count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselItem {
    pub id: String,
    pub title: String,
    pub overview: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
}

impl From<&Movie> for CarouselItem {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            image_url: movie.backdrop_url.clone().or_else(|| movie.poster_url.clone()),
            rating: movie.rating,
        }
    }
}
