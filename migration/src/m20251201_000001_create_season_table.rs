use sea_orm_migration::prelude::*;

/// Creates the `season` table. One row per edition of the league.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Season {
    Table,
    Id,
    SeasonName,
    Year,
    SeasonNumber,
    StartDate,
    EndDate,
    AuctionDate,
    IsActive,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Season::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Season::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Season::SeasonName).string_len(100).null())
                    .col(ColumnDef::new(Season::Year).string_len(10).not_null())
                    .col(ColumnDef::new(Season::SeasonNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Season::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Season::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Season::AuctionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Season::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Season::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_season_year_number")
                    .table(Season::Table)
                    .col(Season::Year)
                    .col(Season::SeasonNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Season::Table).to_owned())
            .await
    }
}
