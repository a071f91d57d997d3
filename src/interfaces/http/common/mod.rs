//! Envelope, error mapping and extractors shared by the HTTP modules.

pub mod response;
pub mod validated_json;

pub use response::*;
pub use validated_json::ValidatedJson;
