//! Home page rows

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::Dashboard;
use crate::domain::CarouselItem;
use crate::interfaces::http::common::PaginatedResponse;
use crate::interfaces::http::modules::movies::MovieDto;
use crate::interfaces::http::modules::preferences::RecommendationDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CarouselItemDto {
    pub id: String,
    pub title: String,
    pub overview: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
}

impl From<CarouselItem> for CarouselItemDto {
    fn from(c: CarouselItem) -> Self {
        Self {
            id: c.id,
            title: c.title,
            overview: c.overview,
            image_url: c.image_url,
            rating: c.rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardDto {
    pub hero: Vec<CarouselItemDto>,
    pub trending: PaginatedResponse<MovieDto>,
    pub top_picks: Vec<RecommendationDto>,
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            hero: d.hero.into_iter().map(CarouselItemDto::from).collect(),
            trending: PaginatedResponse::from_page(d.trending),
            top_picks: d.top_picks.into_iter().map(RecommendationDto::from).collect(),
        }
    }
}
