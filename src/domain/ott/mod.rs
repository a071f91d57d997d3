//! Streaming, rental and purchase availability of a movie.

pub mod model;
pub mod parse;

pub use model::{fallback_services, OttAvailability, OttService, OttServiceType, VideoQuality};
pub use parse::{extract_services_from_text, parse_services_json};
