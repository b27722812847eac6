pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_memberships;
mod m20251001_000002_create_recharges;
mod m20251001_000003_create_notifications_log;
mod m20251001_000004_create_report_objects;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_memberships::Migration),
            Box::new(m20251001_000002_create_recharges::Migration),
            Box::new(m20251001_000003_create_notifications_log::Migration),
            Box::new(m20251001_000004_create_report_objects::Migration),
        ]
    }
}
