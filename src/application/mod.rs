//! Application layer: use-case services over the domain repositories.

pub mod access;
pub mod availability;
pub mod carousel;
pub mod catalog;
pub mod dashboard;
pub mod identity;
pub mod library;
pub mod reviews;

pub use access::{authenticate, authorize, Access, Credentials};
pub use availability::AvailabilityService;
pub use carousel::AutoAdvance;
pub use catalog::{CatalogService, MovieDetail};
pub use dashboard::{Dashboard, DashboardService};
pub use identity::{AuthResult, UserService};
pub use library::LibraryService;
pub use reviews::{ReviewDraft, ReviewService};
