use sea_orm_migration::prelude::*;

mod m20251018_create_novels;
mod m20251018_create_users;
mod m20251018_create_volumes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_create_users::Migration),
            Box::new(m20251018_create_novels::Migration),
            Box::new(m20251018_create_volumes::Migration),
        ]
    }
}

/// Named column-level `CHECK` clause, accepted by both `SQLite` and `PostgreSQL`.
fn named_check(name: &str, condition: &str) -> String {
    format!("CONSTRAINT {name} CHECK ({condition})")
}
