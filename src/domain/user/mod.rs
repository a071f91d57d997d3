//! User aggregate
//!
//! Contains the User entity, its insert/update shapes, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewUser, ProfileUpdate, User};
pub use repository::UserRepository;
