//! Create helpful_votes table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000003_create_reviews::Reviews;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HelpfulVotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HelpfulVotes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HelpfulVotes::ReviewId).string().not_null())
                    .col(ColumnDef::new(HelpfulVotes::UserId).string().not_null())
                    .col(ColumnDef::new(HelpfulVotes::IsHelpful).boolean().not_null())
                    .col(
                        ColumnDef::new(HelpfulVotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_helpful_votes_review")
                            .from(HelpfulVotes::Table, HelpfulVotes::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_helpful_votes_user")
                            .from(HelpfulVotes::Table, HelpfulVotes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_helpful_votes_review_user")
                    .table(HelpfulVotes::Table)
                    .col(HelpfulVotes::ReviewId)
                    .col(HelpfulVotes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HelpfulVotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum HelpfulVotes {
    Table,
    Id,
    ReviewId,
    UserId,
    IsHelpful,
    CreatedAt,
}
