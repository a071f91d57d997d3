use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use crate::domain::{DomainError, DomainResult, NewUser, ProfileUpdate, User, UserRepository};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        avatar_url: model.avatar_url,
        bio: model.bio,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Maps unique-constraint violations to `Conflict`, everything else to
/// `Upstream`.
pub(super) fn conflict_or_upstream(e: DbErr, message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(message.to_string()),
        _ => DomainError::Upstream(e),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(new.email),
            name: Set(new.name),
            password_hash: Set(new.password_hash),
            avatar_url: Set(None),
            bio: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_upstream(e, "Email already registered"))?;

        Ok(user_model_to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(avatar_url) = update.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        if let Some(bio) = update.bio {
            active.bio = Set(Some(bio));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(user_model_to_domain(updated)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    pub(crate) fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Film Fan".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        repo.create(new_user("fan@example.com")).await.unwrap();
        let err = repo.create(new_user("fan@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_profile_touches_only_given_fields() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let user = repo.create(new_user("fan@example.com")).await.unwrap();

        let updated = repo
            .update_profile(
                &user.id,
                ProfileUpdate {
                    bio: Some("Sci-fi nerd".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Film Fan");
        assert_eq!(updated.bio.as_deref(), Some("Sci-fi nerd"));

        let by_email = repo.find_by_email("fan@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(repo
            .update_profile("missing", ProfileUpdate::default())
            .await
            .unwrap()
            .is_none());
    }
}
