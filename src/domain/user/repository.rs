use async_trait::async_trait;

use super::{NewUser, ProfileUpdate, User};
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> DomainResult<User>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> DomainResult<Option<User>>;
}
