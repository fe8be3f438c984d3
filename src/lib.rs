pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod state;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
pub use config::Settings;
pub use db::{Database, Session};

pub async fn run(
    cli: Cli,
    settings: Settings,
    env_file: config::EnvFile,
) -> anyhow::Result<()> {
    init_tracing(&settings.logging);
    env_file.log();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cli::cmd_serve(settings).await,
        Commands::Migrate { action } => cli::cmd_migrate(&settings, action).await,
    }
}

fn init_tracing(logging: &config::LogSettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format {
        config::LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        config::LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
