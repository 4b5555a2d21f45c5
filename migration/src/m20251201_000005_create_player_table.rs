use sea_orm_migration::prelude::*;

/// Creates the `player` table. A player row is one registration for one season;
/// `team_id`/`price` carry the auction outcome.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
    Name,
    FatherName,
    Phone,
    Age,
    Role,
    BattingStyle,
    BowlingStyle,
    Panchayat,
    Address,
    PhotoUrl,
    SeasonId,
    TeamId,
    Price,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Season {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Player::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Player::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Player::FatherName).string_len(100).not_null())
                    .col(ColumnDef::new(Player::Phone).string_len(10).not_null())
                    .col(ColumnDef::new(Player::Age).integer().not_null())
                    .col(ColumnDef::new(Player::Role).string_len(30).not_null())
                    .col(ColumnDef::new(Player::BattingStyle).string_len(30).null())
                    .col(ColumnDef::new(Player::BowlingStyle).string_len(30).null())
                    .col(ColumnDef::new(Player::Panchayat).string_len(100).not_null())
                    .col(ColumnDef::new(Player::Address).string_len(500).not_null())
                    .col(ColumnDef::new(Player::PhotoUrl).string_len(500).null())
                    .col(ColumnDef::new(Player::SeasonId).uuid().not_null())
                    .col(ColumnDef::new(Player::TeamId).uuid().null())
                    .col(ColumnDef::new(Player::Price).big_integer().null())
                    .col(
                        ColumnDef::new(Player::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Player::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Player::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_season_id")
                            .from(Player::Table, Player::SeasonId)
                            .to(Season::Table, Season::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_team_id")
                            .from(Player::Table, Player::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate-registration lookups go by (season_id, phone)
        manager
            .create_index(
                Index::create()
                    .name("idx_player_season_phone")
                    .table(Player::Table)
                    .col(Player::SeasonId)
                    .col(Player::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_player_team_id")
                    .table(Player::Table)
                    .col(Player::TeamId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await
    }
}
