use async_trait::async_trait;

use super::{PreferenceInput, Recommendation, UserPreference};
use crate::shared::DomainResult;

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// `None` when the user has never saved preferences.
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Option<UserPreference>>;
    async fn upsert(&self, user_id: &str, input: PreferenceInput) -> DomainResult<UserPreference>;
    /// Store function `get_user_recommendations`.
    async fn recommendations(&self, user_id: &str, limit: usize) -> DomainResult<Vec<Recommendation>>;
}
