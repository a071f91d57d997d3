//! The three rows of the signed-in home page.

use std::sync::Arc;

use crate::application::catalog::{CatalogService, DEFAULT_MOVIE_LIMIT};
use crate::application::library::LibraryService;
use crate::domain::{CarouselItem, DomainResult, Movie, Recommendation};
use crate::shared::{PageRequest, PageResult};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub hero: Vec<CarouselItem>,
    pub trending: PageResult<Movie>,
    pub top_picks: Vec<Recommendation>,
}

pub struct DashboardService {
    catalog: Arc<CatalogService>,
    library: Arc<LibraryService>,
    hero_size: usize,
}

impl DashboardService {
    pub fn new(catalog: Arc<CatalogService>, library: Arc<LibraryService>, hero_size: usize) -> Self {
        Self {
            catalog,
            library,
            hero_size,
        }
    }

    pub fn hero_size(&self) -> usize {
        self.hero_size
    }

    pub async fn hero(&self) -> DomainResult<Vec<CarouselItem>> {
        self.catalog.hero_items(self.hero_size).await
    }

    pub async fn trending(&self, page: PageRequest) -> DomainResult<PageResult<Movie>> {
        self.catalog.trending(page).await
    }

    pub async fn load(&self, user_id: &str) -> DomainResult<Dashboard> {
        let first_page = PageRequest::new(1, DEFAULT_MOVIE_LIMIT)?;
        let (hero, trending, top_picks) = tokio::try_join!(
            self.hero(),
            self.trending(first_page),
            self.library.get_user_recommendations(user_id),
        )?;
        Ok(Dashboard {
            hero,
            trending,
            top_picks,
        })
    }
}
