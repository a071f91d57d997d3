//! # Cinelog
//!
//! Movie catalog and review service: browse and search released movies,
//! write reviews, keep a watchlist, get recommendations from saved
//! preferences, and follow a rotating hero carousel over a WebSocket.
//!
//! ## Architecture
//!
//! - **domain**: entities, value objects, repository traits and the
//!   carousel rotation state machine
//! - **application**: use-case services (catalog, reviews, library,
//!   identity, availability, dashboard) and the route guard
//! - **infrastructure**: SeaORM storage, JWT/bcrypt, Perplexity enrichment
//! - **interfaces**: REST API with Swagger docs and the hero socket
//! - **shared**: errors, pagination, generations, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::{create_api_router, AppServices};
pub use server::{init_tracing, ServerHandle, ServerOptions};
