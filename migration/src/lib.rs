pub use sea_orm_migration::prelude::*;

mod m20251201_000001_create_season_table;
mod m20251201_000002_create_owner_table;
mod m20251201_000003_create_team_table;
mod m20251201_000004_create_user_table;
mod m20251201_000005_create_player_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251201_000001_create_season_table::Migration),
            Box::new(m20251201_000002_create_owner_table::Migration),
            Box::new(m20251201_000003_create_team_table::Migration),
            Box::new(m20251201_000004_create_user_table::Migration),
            Box::new(m20251201_000005_create_player_table::Migration),
        ]
    }
}
