//! Schema migration command handler

use anyhow::Context;

use crate::cli::MigrateAction;
use crate::config::Settings;
use crate::db::Database;

pub async fn cmd_migrate(settings: &Settings, action: MigrateAction) -> anyhow::Result<()> {
    let db = Database::connect(settings)
        .await
        .context("Failed to connect to database")?;

    match action {
        MigrateAction::Up => db.migrate().await?,
        MigrateAction::Down { steps } => db.rollback_migrations(steps).await?,
        MigrateAction::Fresh => db.reset_schema().await?,
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            println!("Migrations ({} total)", status.len());
            println!("{:-<50}", "");
            for (name, applied) in status {
                let marker = if applied { "applied" } else { "pending" };
                println!("{marker:<8} {name}");
            }
        }
    }

    db.close().await?;
    Ok(())
}
