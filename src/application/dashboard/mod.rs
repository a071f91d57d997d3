pub mod service;

pub use service::{Dashboard, DashboardService};
