//! Outer surfaces: the REST API and the hero carousel socket.

pub mod http;
pub mod ws;
