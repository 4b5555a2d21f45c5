use sea_orm_migration::prelude::*;

/// Creates the `owner` table for team owners (auction buyers).
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Owner {
    Table,
    Id,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    OwnerPassword,
    IsActive,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Owner::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Owner::OwnerName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Owner::OwnerEmail)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Owner::OwnerPhone).string_len(20).null())
                    .col(
                        ColumnDef::new(Owner::OwnerPassword)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Owner::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Owner::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Owner::Table).to_owned())
            .await
    }
}
