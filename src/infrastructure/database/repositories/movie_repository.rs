use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr, NullOrdering, Order, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{
    FilterSet, Movie, MovieRepository, MovieSort, MovieStatus, MovieSummary, NewMovie,
};
use crate::infrastructure::database::entities::{decode_list, encode_list, movie};
use crate::shared::{DomainResult, PageWindow};

pub struct SeaOrmMovieRepository {
    db: DatabaseConnection,
}

impl SeaOrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: movie::MovieStatus) -> MovieStatus {
    match status {
        movie::MovieStatus::Released => MovieStatus::Released,
        movie::MovieStatus::Upcoming => MovieStatus::Upcoming,
        movie::MovieStatus::Cancelled => MovieStatus::Cancelled,
    }
}

fn status_to_entity(status: MovieStatus) -> movie::MovieStatus {
    match status {
        MovieStatus::Released => movie::MovieStatus::Released,
        MovieStatus::Upcoming => movie::MovieStatus::Upcoming,
        MovieStatus::Cancelled => movie::MovieStatus::Cancelled,
    }
}

pub(super) fn movie_model_to_domain(model: movie::Model) -> Movie {
    Movie {
        id: model.id,
        title: model.title,
        year: model.year,
        runtime: model.runtime,
        genres: decode_list(&model.genres),
        languages: decode_list(&model.languages),
        backdrop_url: model.backdrop_url,
        poster_url: model.poster_url,
        trailer_youtube_id: model.trailer_youtube_id,
        rating: model.rating,
        overview: model.overview,
        cast: model.cast,
        director: model.director,
        release_date: model.release_date,
        country: model.country,
        age_rating: model.age_rating,
        status: status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Query helpers ───────────────────────────────────────────────

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// One element of a JSON array text column, compared byte for byte.
/// `instr` is case-sensitive where `LIKE` folds ASCII case.
fn has_element(column: movie::Column, value: &str) -> SimpleExpr {
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""));
    Expr::cust_with_exprs(
        "instr($1, $2) > 0",
        [
            SimpleExpr::from(Expr::col((movie::Entity, column))),
            SimpleExpr::from(Expr::val(quoted)),
        ],
    )
}

/// Any of `values` appears in `column`.
fn intersects(column: movie::Column, values: &[String]) -> Condition {
    values
        .iter()
        .fold(Condition::any(), |cond, v| cond.add(has_element(column, v)))
}

fn released() -> Select<movie::Entity> {
    movie::Entity::find().filter(movie::Column::Status.eq(movie::MovieStatus::Released))
}

fn apply_filters(mut select: Select<movie::Entity>, filters: &FilterSet) -> Select<movie::Entity> {
    if !filters.genres.is_empty() {
        select = select.filter(intersects(movie::Column::Genres, &filters.genres));
    }
    if !filters.languages.is_empty() {
        select = select.filter(intersects(movie::Column::Languages, &filters.languages));
    }
    if let Some(min) = filters.min_rating {
        select = select.filter(movie::Column::Rating.gte(min));
    }
    if let Some(max) = filters.max_runtime {
        select = select.filter(movie::Column::Runtime.lte(max));
    }
    select
}

/// Every whitespace-separated term must occur in the title.
fn apply_text(mut select: Select<movie::Entity>, text: &str) -> Select<movie::Entity> {
    for term in text.split_whitespace() {
        let pattern = LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\');
        select = select.filter(movie::Column::Title.like(pattern));
    }
    select
}

fn apply_sort(select: Select<movie::Entity>, sort: MovieSort) -> Select<movie::Entity> {
    let select = match sort {
        MovieSort::RatingDesc => select.order_by_desc(movie::Column::Rating),
        // unrated titles never lead an ascending page
        MovieSort::RatingAsc => {
            select.order_by_with_nulls(movie::Column::Rating, Order::Asc, NullOrdering::Last)
        }
        MovieSort::Newest => select.order_by_desc(movie::Column::Year),
        MovieSort::TitleAsc => select.order_by_asc(movie::Column::Title),
    };
    select.order_by_asc(movie::Column::Id)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl MovieRepository for SeaOrmMovieRepository {
    async fn query(
        &self,
        filters: &FilterSet,
        text: Option<&str>,
        sort: MovieSort,
        window: PageWindow,
    ) -> DomainResult<(Vec<Movie>, u64)> {
        let mut select = apply_filters(released(), filters);
        if let Some(text) = text {
            select = apply_text(select, text);
        }

        let total = select.clone().count(&self.db).await?;
        let models = apply_sort(select, sort)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(movie_model_to_domain).collect(), total))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Movie>> {
        let model = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(movie_model_to_domain))
    }

    async fn movies_by_genre(&self, genre: &str) -> DomainResult<Vec<MovieSummary>> {
        let models = released()
            .filter(has_element(movie::Column::Genres, genre))
            .order_by_desc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| movie_model_to_domain(m).summary())
            .collect())
    }

    async fn insert(&self, new: NewMovie) -> DomainResult<Movie> {
        let now = Utc::now();
        let model = movie::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(new.title),
            year: Set(new.year),
            runtime: Set(new.runtime),
            genres: Set(encode_list(&new.genres)),
            languages: Set(encode_list(&new.languages)),
            backdrop_url: Set(new.backdrop_url),
            poster_url: Set(new.poster_url),
            trailer_youtube_id: Set(new.trailer_youtube_id),
            rating: Set(new.rating),
            overview: Set(new.overview),
            cast: Set(new.cast),
            director: Set(new.director),
            release_date: Set(new.release_date),
            country: Set(new.country),
            age_rating: Set(new.age_rating),
            status: Set(status_to_entity(new.status)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(movie_model_to_domain(model))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    pub(crate) fn new_movie(title: &str, year: i32, rating: f64, genres: &[&str]) -> NewMovie {
        NewMovie {
            rating: Some(rating),
            runtime: Some(120),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            languages: vec!["English".to_string()],
            backdrop_url: Some(format!("https://img.example/{year}.jpg")),
            ..NewMovie::new(title, year)
        }
    }

    async fn seeded() -> SeaOrmMovieRepository {
        let repo = SeaOrmMovieRepository::new(test_database().await);
        repo.insert(new_movie("Dune: Part Two", 2024, 8.8, &["Sci-Fi", "Adventure"]))
            .await
            .unwrap();
        repo.insert(new_movie("Oppenheimer", 2023, 8.6, &["Drama", "History"]))
            .await
            .unwrap();
        repo.insert(NewMovie {
            runtime: Some(180),
            languages: vec!["French".to_string()],
            ..new_movie("Interstellar", 2014, 8.7, &["Sci-Fi", "Drama"])
        })
        .await
        .unwrap();
        repo.insert(NewMovie {
            status: MovieStatus::Upcoming,
            ..new_movie("Dune: Messiah", 2026, 9.0, &["Sci-Fi"])
        })
        .await
        .unwrap();
        repo
    }

    fn all() -> PageWindow {
        PageWindow { offset: 0, limit: 100 }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn lists_released_by_rating() {
        let repo = seeded().await;
        let (movies, total) = repo
            .query(&FilterSet::default(), None, MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(titles(&movies), ["Dune: Part Two", "Interstellar", "Oppenheimer"]);
    }

    #[tokio::test]
    async fn genre_filter_intersects() {
        let repo = seeded().await;
        let filters = FilterSet::default().with_genres(["History", "Adventure"]);
        let (movies, total) = repo
            .query(&filters, None, MovieSort::TitleAsc, all())
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(titles(&movies), ["Dune: Part Two", "Oppenheimer"]);
    }

    #[tokio::test]
    async fn genre_filter_matches_whole_elements() {
        let repo = seeded().await;
        let filters = FilterSet::default().with_genres(["Sci"]);
        let (_, total) = repo
            .query(&filters, None, MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn list_filters_are_case_sensitive() {
        let repo = seeded().await;
        let genres = FilterSet::default().with_genres(["sci-fi"]);
        let (_, total) = repo
            .query(&genres, None, MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert_eq!(total, 0);

        let languages = FilterSet::default().with_languages(["ENGLISH"]);
        let (_, total) = repo
            .query(&languages, None, MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert_eq!(total, 0);

        assert!(repo.movies_by_genre("SCI-FI").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ascending_rating_puts_unrated_last() {
        let repo = seeded().await;
        repo.insert(NewMovie {
            rating: None,
            ..new_movie("Untitled Project", 2025, 0.0, &["Drama"])
        })
        .await
        .unwrap();
        let (movies, _) = repo
            .query(&FilterSet::default(), None, MovieSort::RatingAsc, all())
            .await
            .unwrap();
        assert_eq!(
            titles(&movies),
            ["Oppenheimer", "Interstellar", "Dune: Part Two", "Untitled Project"]
        );
    }

    #[tokio::test]
    async fn filters_compose_conjunctively() {
        let repo = seeded().await;
        let filters = FilterSet::default()
            .with_genres(["Sci-Fi"])
            .with_languages(["English"])
            .with_min_rating(8.7)
            .with_max_runtime(150);
        let (movies, total) = repo
            .query(&filters, None, MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(titles(&movies), ["Dune: Part Two"]);
    }

    #[tokio::test]
    async fn window_limits_rows_but_not_total() {
        let repo = seeded().await;
        let (movies, total) = repo
            .query(
                &FilterSet::default(),
                None,
                MovieSort::Newest,
                PageWindow { offset: 1, limit: 1 },
            )
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(titles(&movies), ["Oppenheimer"]);
    }

    #[tokio::test]
    async fn text_search_requires_every_term() {
        let repo = seeded().await;
        let (movies, _) = repo
            .query(&FilterSet::default(), Some("dune two"), MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert_eq!(titles(&movies), ["Dune: Part Two"]);

        let (movies, _) = repo
            .query(&FilterSet::default(), Some("dune three"), MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn text_search_treats_wildcards_literally() {
        let repo = seeded().await;
        let (movies, _) = repo
            .query(&FilterSet::default(), Some("%"), MovieSort::RatingDesc, all())
            .await
            .unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn movies_by_genre_returns_summaries() {
        let repo = seeded().await;
        let rows = repo.movies_by_genre("Sci-Fi").await.unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Dune: Part Two", "Interstellar"]);
    }

    #[tokio::test]
    async fn find_by_id_round_trips_lists() {
        let repo = seeded().await;
        let (movies, _) = repo
            .query(&FilterSet::default(), Some("Interstellar"), MovieSort::RatingDesc, all())
            .await
            .unwrap();
        let found = repo.find_by_id(&movies[0].id).await.unwrap().unwrap();
        assert_eq!(found.genres, ["Sci-Fi", "Drama"]);
        assert_eq!(found.languages, ["French"]);
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 4);
    }
}
