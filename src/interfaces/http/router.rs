//! API router with Swagger UI

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AvailabilityService, CatalogService, DashboardService, LibraryService, ReviewService,
    UserService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::AvailabilityLookup;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{route_guard, GuardState};
use crate::interfaces::http::modules::{
    auth, dashboard, health, me, metrics, movies, preferences, request_id, reviews, watchlist,
};
use crate::interfaces::ws::{ws_hero_handler, HeroSocketState};

/// Everything the routes need, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
    pub catalog: Arc<CatalogService>,
    pub reviews: Arc<ReviewService>,
    pub library: Arc<LibraryService>,
    pub users: Arc<UserService>,
    pub availability: Arc<AvailabilityService>,
    pub dashboard: Arc<DashboardService>,
    pub hero_interval: Duration,
    pub metrics: Option<PrometheusHandle>,
    pub started_at: Arc<Instant>,
}

impl AppServices {
    pub fn build(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        lookup: Arc<dyn AvailabilityLookup>,
        hero_size: usize,
        hero_interval: Duration,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(repos.clone()));
        let library = Arc::new(LibraryService::new(repos.clone()));
        let dashboard = Arc::new(DashboardService::new(
            catalog.clone(),
            library.clone(),
            hero_size,
        ));
        Self {
            reviews: Arc::new(ReviewService::new(repos.clone())),
            users: Arc::new(UserService::new(repos.clone(), jwt_config.clone())),
            availability: Arc::new(AvailabilityService::new(repos.clone(), lookup)),
            catalog,
            library,
            dashboard,
            db,
            repos,
            jwt_config,
            hero_interval,
            metrics: None,
            started_at: Arc::new(Instant::now()),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.users = Arc::new(
            UserService::new(self.repos.clone(), self.jwt_config.clone()).with_bcrypt_cost(cost),
        );
        self
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        movies::list_movies,
        movies::search_movies,
        movies::get_movie,
        movies::get_movie_reviews,
        movies::movies_by_genre,
        movies::ott_availability,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        reviews::vote_helpful,
        watchlist::get_watchlist,
        watchlist::add_to_watchlist,
        watchlist::update_watchlist_item,
        watchlist::remove_from_watchlist,
        preferences::get_preferences,
        preferences::put_preferences,
        preferences::get_recommendations,
        me::get_me,
        me::update_me,
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<movies::MovieDto>,
            PaginatedResponse<movies::ReviewDto>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            me::ProfileDto,
            me::UpdateProfileRequest,
            movies::MovieDto,
            movies::MovieSummaryDto,
            movies::MovieDetailDto,
            movies::ReviewDto,
            movies::AuthorDto,
            movies::OttServiceDto,
            movies::OttAvailabilityDto,
            reviews::CreateReviewRequest,
            reviews::UpdateReviewRequest,
            reviews::HelpfulVoteRequest,
            reviews::HelpfulVoteDto,
            watchlist::WatchlistItemDto,
            watchlist::WatchlistEntryDto,
            watchlist::AddToWatchlistRequest,
            watchlist::UpdateWatchlistRequest,
            preferences::PreferenceDto,
            preferences::PreferenceRequest,
            preferences::RecommendationDto,
            dashboard::CarouselItemDto,
            dashboard::DashboardDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and store connectivity"),
        (name = "Authentication", description = "Signup and login (JWT)"),
        (name = "Movies", description = "Catalog listing, search, detail, reviews and streaming availability"),
        (name = "Reviews", description = "Writing, editing and voting on reviews"),
        (name = "Watchlist", description = "The signed-in user's watchlist"),
        (name = "Preferences", description = "Viewing preferences and personalized recommendations"),
        (name = "Profile", description = "The signed-in user's profile"),
        (name = "Dashboard", description = "Home page rows; the hero carousel socket lives at /api/v1/dashboard/hero/ws"),
    ),
    info(
        title = "Cinelog API",
        version = "1.0.0",
        description = "Movie catalog, reviews, watchlists and recommendations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Builds the full router: REST API, hero socket, health, metrics and docs.
///
/// The route guard wraps every route, so protection is decided only by
/// path prefix in [`crate::application::access`].
pub fn create_api_router(services: AppServices) -> Router {
    let guard = GuardState {
        jwt_config: services.jwt_config.clone(),
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: services.db.clone(),
            started_at: services.started_at.clone(),
        });

    let auth_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .with_state(auth::AuthHandlerState {
            users: services.users.clone(),
        });

    let movie_state = movies::MoviesHandlerState {
        catalog: services.catalog.clone(),
        availability: services.availability.clone(),
    };
    let movie_routes = Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}/reviews", get(movies::get_movie_reviews))
        .route("/movies/{id}/ott-availability", get(movies::ott_availability))
        .route("/genres/{genre}/movies", get(movies::movies_by_genre))
        .with_state(movie_state);

    let review_routes = Router::new()
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/reviews/{id}/helpful", post(reviews::vote_helpful))
        .with_state(reviews::ReviewsHandlerState {
            reviews: services.reviews.clone(),
        });

    // PATCH takes the item id, DELETE the movie id
    let watchlist_routes = Router::new()
        .route(
            "/watchlist",
            get(watchlist::get_watchlist).post(watchlist::add_to_watchlist),
        )
        .route(
            "/watchlist/{id}",
            patch(watchlist::update_watchlist_item).delete(watchlist::remove_from_watchlist),
        )
        .with_state(watchlist::WatchlistHandlerState {
            library: services.library.clone(),
        });

    let preference_routes = Router::new()
        .route(
            "/preferences",
            get(preferences::get_preferences).put(preferences::put_preferences),
        )
        .route("/recommendations", get(preferences::get_recommendations))
        .with_state(preferences::PreferencesHandlerState {
            library: services.library.clone(),
        });

    let me_routes = Router::new()
        .route("/me", get(me::get_me).patch(me::update_me))
        .with_state(me::MeHandlerState {
            users: services.users.clone(),
        });

    let dashboard_routes = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .with_state(dashboard::DashboardHandlerState {
            dashboard: services.dashboard.clone(),
        })
        .merge(
            Router::new()
                .route("/dashboard/hero/ws", get(ws_hero_handler))
                .with_state(HeroSocketState {
                    dashboard: services.dashboard.clone(),
                    interval: services.hero_interval,
                }),
        );

    let api_v1 = Router::new()
        .merge(auth_routes)
        .merge(review_routes)
        .merge(watchlist_routes)
        .merge(movie_routes)
        .merge(preference_routes)
        .merge(me_routes)
        .merge(dashboard_routes);

    let mut app = Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_v1)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = services.metrics.clone() {
        app = app.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Innermost first: guard, then metrics (so 401s are counted), request id, tracing, CORS.
    app.layer(middleware::from_fn_with_state(guard, route_guard))
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
