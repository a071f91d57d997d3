//! WebSocket interfaces
//!
//! - `hero`: the dashboard hero carousel, one session task per socket

pub mod hero;

pub use hero::{ws_hero_handler, HeroSocketState};
