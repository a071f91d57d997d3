//! Create watchlist table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_movies::Movies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Watchlist::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Watchlist::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Watchlist::UserId).string().not_null())
                    .col(ColumnDef::new(Watchlist::MovieId).string().not_null())
                    .col(
                        ColumnDef::new(Watchlist::Status)
                            .string_len(20)
                            .not_null()
                            .default("plan_to_watch"),
                    )
                    .col(
                        ColumnDef::new(Watchlist::Priority)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Watchlist::Notes).text())
                    .col(
                        ColumnDef::new(Watchlist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Watchlist::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlist_user")
                            .from(Watchlist::Table, Watchlist::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlist_movie")
                            .from(Watchlist::Table, Watchlist::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One entry per user and movie
        manager
            .create_index(
                Index::create()
                    .name("idx_watchlist_user_movie")
                    .table(Watchlist::Table)
                    .col(Watchlist::UserId)
                    .col(Watchlist::MovieId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Watchlist::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Watchlist {
    Table,
    Id,
    UserId,
    MovieId,
    Status,
    Priority,
    Notes,
    CreatedAt,
    UpdatedAt,
}
