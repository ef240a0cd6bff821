pub use sea_orm_migration::prelude::*;

pub mod seed;

mod m20250310_000000_bootstrap;
mod m20250310_000001_create_users;
mod m20250310_000002_create_groups;
mod m20250310_000003_create_user_groups;
mod m20250310_000004_seed_groups;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000000_bootstrap::Migration),
            Box::new(m20250310_000001_create_users::Migration),
            Box::new(m20250310_000002_create_groups::Migration),
            Box::new(m20250310_000003_create_user_groups::Migration),
            Box::new(m20250310_000004_seed_groups::Migration),
        ]
    }
}
