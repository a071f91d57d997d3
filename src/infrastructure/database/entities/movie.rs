//! Movie entity for database

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MovieStatus {
    #[sea_orm(string_value = "released")]
    Released,
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub year: i32,
    #[sea_orm(nullable)]
    pub runtime: Option<i32>,

    /// JSON array text, see [`super::encode_list`]
    pub genres: String,
    /// JSON array text
    pub languages: String,

    #[sea_orm(nullable)]
    pub backdrop_url: Option<String>,
    #[sea_orm(nullable)]
    pub poster_url: Option<String>,
    #[sea_orm(nullable)]
    pub trailer_youtube_id: Option<String>,
    #[sea_orm(nullable)]
    pub rating: Option<f64>,
    #[sea_orm(nullable)]
    pub overview: Option<String>,
    #[sea_orm(nullable)]
    pub cast: Option<Json>,
    #[sea_orm(nullable)]
    pub director: Option<String>,
    #[sea_orm(nullable)]
    pub release_date: Option<NaiveDate>,
    #[sea_orm(nullable)]
    pub country: Option<String>,
    #[sea_orm(nullable)]
    pub age_rating: Option<String>,
    pub status: MovieStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::watchlist::Entity")]
    Watchlist,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::watchlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Watchlist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
