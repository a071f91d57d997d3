//! Catalog DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::catalog::{MovieDetail, DEFAULT_MOVIE_LIMIT};
use crate::domain::{
    FilterSet, Movie, MovieSort, MovieSummary, OttAvailability, OttService, Review, ReviewWithAuthor,
    UserSummary,
};
use crate::shared::{DomainResult, PageRequest};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieDto {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub runtime: Option<i32>,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_youtube_id: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub cast: Option<serde_json::Value>,
    pub director: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub age_rating: Option<String>,
    /// released, upcoming or cancelled
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Movie> for MovieDto {
    fn from(m: Movie) -> Self {
        Self {
            status: m.status.as_str().to_string(),
            id: m.id,
            title: m.title,
            year: m.year,
            runtime: m.runtime,
            genres: m.genres,
            languages: m.languages,
            backdrop_url: m.backdrop_url,
            poster_url: m.poster_url,
            trailer_youtube_id: m.trailer_youtube_id,
            rating: m.rating,
            overview: m.overview,
            cast: m.cast,
            director: m.director,
            release_date: m.release_date,
            country: m.country,
            age_rating: m.age_rating,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Row shape of the by-genre listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieSummaryDto {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
}

impl From<MovieSummary> for MovieSummaryDto {
    fn from(m: MovieSummary) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            rating: m.rating,
            poster_url: m.poster_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<UserSummary> for AuthorDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            name: u.name,
            avatar_url: u.avatar_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: String,
    pub movie_id: String,
    pub user_id: String,
    pub rating: i32,
    pub text: String,
    pub sentiment: String,
    pub is_spoiler: bool,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present on read endpoints; `null` when the author's account is gone
    pub author: Option<AuthorDto>,
}

impl From<ReviewWithAuthor> for ReviewDto {
    fn from(r: ReviewWithAuthor) -> Self {
        let mut dto = Self::from(r.review);
        dto.author = r.author.map(AuthorDto::from);
        dto
    }
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            movie_id: review.movie_id,
            user_id: review.user_id,
            rating: review.rating,
            text: review.text,
            sentiment: review.sentiment.as_str().to_string(),
            is_spoiler: review.is_spoiler,
            helpful_count: review.helpful_count,
            created_at: review.created_at,
            updated_at: review.updated_at,
            author: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetailDto {
    pub movie: MovieDto,
    pub reviews: Vec<ReviewDto>,
}

impl From<MovieDetail> for MovieDetailDto {
    fn from(d: MovieDetail) -> Self {
        Self {
            movie: d.movie.into(),
            reviews: d.reviews.into_iter().map(ReviewDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OttServiceDto {
    pub name: String,
    /// stream, rent or buy
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// SD, HD or 4K
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    pub regions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<OttService> for OttServiceDto {
    fn from(s: OttService) -> Self {
        Self {
            name: s.name,
            service_type: s.service_type.as_str().to_string(),
            price: s.price,
            quality: s.quality.map(|q| q.as_str().to_string()),
            regions: s.regions,
            url: s.url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OttAvailabilityDto {
    pub movie_id: String,
    pub movie_title: String,
    pub year: i32,
    pub services: Vec<OttServiceDto>,
    pub last_updated: DateTime<Utc>,
}

impl From<OttAvailability> for OttAvailabilityDto {
    fn from(a: OttAvailability) -> Self {
        Self {
            movie_id: a.movie_id,
            movie_title: a.movie_title,
            year: a.year,
            services: a.services.into_iter().map(OttServiceDto::from).collect(),
            last_updated: a.last_updated,
        }
    }
}

/// Listing and search parameters. List values are comma separated.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieQueryParams {
    /// Title search terms (search endpoint only)
    pub q: Option<String>,
    /// e.g. `Drama,Sci-Fi`
    pub genres: Option<String>,
    /// e.g. `English,Korean`
    pub languages: Option<String>,
    pub min_rating: Option<f64>,
    pub max_runtime: Option<i32>,
    /// rating_desc (default), rating_asc, newest, title
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MovieQueryParams {
    pub fn filters(&self) -> FilterSet {
        FilterSet {
            genres: FilterSet::split_list(self.genres.as_deref()),
            languages: FilterSet::split_list(self.languages.as_deref()),
            min_rating: self.min_rating,
            max_runtime: self.max_runtime,
        }
    }

    pub fn page_request(&self) -> DomainResult<PageRequest> {
        PageRequest::from_params(self.page, self.limit, DEFAULT_MOVIE_LIMIT)
    }

    pub fn sort(&self) -> DomainResult<MovieSort> {
        self.sort
            .as_deref()
            .map(str::parse::<MovieSort>)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ott::fallback_services;

    #[test]
    fn query_params_build_filters_and_sort() {
        let params = MovieQueryParams {
            genres: Some("Drama, Sci-Fi,".into()),
            min_rating: Some(7.5),
            sort: Some("newest".into()),
            ..Default::default()
        };
        let filters = params.filters();
        assert_eq!(filters.genres, vec!["Drama", "Sci-Fi"]);
        assert!(filters.languages.is_empty());
        assert_eq!(filters.min_rating, Some(7.5));
        assert_eq!(params.sort().unwrap(), MovieSort::Newest);
        assert_eq!(params.page_request().unwrap().limit(), DEFAULT_MOVIE_LIMIT);
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let params = MovieQueryParams {
            sort: Some("popularity".into()),
            ..Default::default()
        };
        assert!(params.sort().is_err());
    }

    #[test]
    fn ott_dto_uses_wire_labels() {
        let dto: Vec<OttServiceDto> = fallback_services().into_iter().map(Into::into).collect();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json[0]["type"], "stream");
        assert_eq!(json[1]["quality"], "4K");
        assert_eq!(json[2]["price"], 3.99);
        assert!(json[0].get("price").is_none());
    }
}
