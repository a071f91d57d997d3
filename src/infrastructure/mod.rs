//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod enrichment;

pub use database::{init_database, DatabaseConfig};
pub use database::repositories::SeaOrmRepositoryProvider;
pub use enrichment::{AvailabilityLookup, EnrichmentError, PerplexityClient, PerplexityConfig};
