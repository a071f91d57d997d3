//! Create movies table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movies::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(ColumnDef::new(Movies::Year).integer().not_null())
                    .col(ColumnDef::new(Movies::Runtime).integer())
                    .col(
                        ColumnDef::new(Movies::Genres)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Movies::Languages)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Movies::BackdropUrl).string())
                    .col(ColumnDef::new(Movies::PosterUrl).string())
                    .col(ColumnDef::new(Movies::TrailerYoutubeId).string())
                    .col(ColumnDef::new(Movies::Rating).double())
                    .col(ColumnDef::new(Movies::Overview).text())
                    .col(ColumnDef::new(Movies::Cast).json())
                    .col(ColumnDef::new(Movies::Director).string())
                    .col(ColumnDef::new(Movies::ReleaseDate).date())
                    .col(ColumnDef::new(Movies::Country).string())
                    .col(ColumnDef::new(Movies::AgeRating).string())
                    .col(
                        ColumnDef::new(Movies::Status)
                            .string_len(20)
                            .not_null()
                            .default("released"),
                    )
                    .col(
                        ColumnDef::new(Movies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing always filters on status and orders by rating
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_status_rating")
                    .table(Movies::Table)
                    .col(Movies::Status)
                    .col(Movies::Rating)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Movies {
    Table,
    Id,
    Title,
    Year,
    Runtime,
    Genres,
    Languages,
    BackdropUrl,
    PosterUrl,
    TrailerYoutubeId,
    Rating,
    Overview,
    Cast,
    Director,
    ReleaseDate,
    Country,
    AgeRating,
    Status,
    CreatedAt,
    UpdatedAt,
}
