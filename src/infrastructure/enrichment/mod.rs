//! Outbound availability lookups.

pub mod perplexity;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::OttService;

pub use perplexity::{PerplexityClient, PerplexityConfig};

/// Why a lookup produced no usable answer.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("response carried no message content")]
    MissingContent,
}

impl EnrichmentError {
    /// Label used for the `ott_fallback_total` counter.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::MissingContent => "missing_content",
        }
    }
}

/// Finds where a movie can be streamed, rented or bought.
#[async_trait]
pub trait AvailabilityLookup: Send + Sync {
    async fn lookup(&self, title: &str, year: i32) -> Result<Vec<OttService>, EnrichmentError>;
}
