//! Command-line interface for the inkwell backend.

mod commands;

use clap::{Parser, Subcommand};

/// Inkwell - novel publishing backend
#[derive(Parser)]
#[command(name = "inkwell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply pending migrations and serve the HTTP API (default)
    Serve,

    /// Manage the database schema
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Revert applied migrations
    Down {
        /// Number of migrations to revert
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop all tables and reapply every migration
    Fresh,
    /// List migrations and whether they have been applied
    Status,
}

pub use commands::*;
