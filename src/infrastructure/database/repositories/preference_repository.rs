use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::domain::preference::match_score;
use crate::domain::{
    DomainResult, PreferenceInput, PreferenceRepository, Recommendation, UserPreference,
};
use crate::infrastructure::database::entities::{decode_list, encode_list, movie, user_preference};

use super::movie_repository::movie_model_to_domain;

pub struct SeaOrmPreferenceRepository {
    db: DatabaseConnection,
}

impl SeaOrmPreferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn preference_model_to_domain(model: user_preference::Model) -> UserPreference {
    UserPreference {
        id: model.id,
        user_id: model.user_id,
        favorite_genres: decode_list(&model.favorite_genres),
        preferred_languages: decode_list(&model.preferred_languages),
        favorite_ott_services: decode_list(&model.favorite_ott_services),
        min_rating: model.min_rating,
        max_runtime: model.max_runtime,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Score descending, then rating descending, then id.
fn rank(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.match_score
        .total_cmp(&a.match_score)
        .then_with(|| b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)))
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl PreferenceRepository for SeaOrmPreferenceRepository {
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Option<UserPreference>> {
        let model = user_preference::Entity::find()
            .filter(user_preference::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(model.map(preference_model_to_domain))
    }

    async fn upsert(&self, user_id: &str, input: PreferenceInput) -> DomainResult<UserPreference> {
        let now = Utc::now();
        let existing = user_preference::Entity::find()
            .filter(user_preference::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(existing) => {
                let mut active: user_preference::ActiveModel = existing.into();
                active.favorite_genres = Set(encode_list(&input.favorite_genres));
                active.preferred_languages = Set(encode_list(&input.preferred_languages));
                active.favorite_ott_services = Set(encode_list(&input.favorite_ott_services));
                active.min_rating = Set(input.min_rating);
                active.max_runtime = Set(input.max_runtime);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                user_preference::ActiveModel {
                    id: Set(uuid::Uuid::new_v4().to_string()),
                    user_id: Set(user_id.to_string()),
                    favorite_genres: Set(encode_list(&input.favorite_genres)),
                    preferred_languages: Set(encode_list(&input.preferred_languages)),
                    favorite_ott_services: Set(encode_list(&input.favorite_ott_services)),
                    min_rating: Set(input.min_rating),
                    max_runtime: Set(input.max_runtime),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(preference_model_to_domain(model))
    }

    async fn recommendations(&self, user_id: &str, limit: usize) -> DomainResult<Vec<Recommendation>> {
        let prefs = self.find_for_user(user_id).await?;

        let mut select = movie::Entity::find()
            .filter(movie::Column::Status.eq(movie::MovieStatus::Released));
        if let Some(min) = prefs.as_ref().and_then(|p| p.min_rating) {
            select = select.filter(movie::Column::Rating.gte(min));
        }
        let candidates = select.all(&self.db).await?;

        let mut ranked: Vec<Recommendation> = candidates
            .into_iter()
            .map(movie_model_to_domain)
            .filter_map(|m| match_score(prefs.as_ref(), &m).map(|score| Recommendation::new(&m, score)))
            .collect();
        ranked.sort_by(rank);
        ranked.truncate(limit);
        Ok(ranked)
    }
}
