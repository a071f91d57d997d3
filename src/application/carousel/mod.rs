//! Timed driver for the hero carousel.

pub mod autoplay;

pub use autoplay::{AutoAdvance, DEFAULT_INTERVAL};
