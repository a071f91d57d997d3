//! Cross-cutting building blocks shared by every layer.

pub mod errors;
pub mod generation;
pub mod pagination;
pub mod shutdown;

pub use errors::*;
pub use generation::{Generation, RequestGenerations};
pub use pagination::*;
