use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info, warn};

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const DATABASE_URL: &str = "DATABASE_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// What happened to the `.env` file at startup.
///
/// Reading it happens before logging is set up, so the outcome is kept and
/// reported once the subscriber is installed.
#[derive(Debug, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(PathBuf),
    Absent,
    Unreadable(String),
}

impl EnvFile {
    /// Loads `.env` from the working directory or one of its parents.
    #[must_use]
    pub fn load() -> Self {
        Self::from_result(dotenvy::dotenv())
    }

    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::Absent,
            Err(e) => Self::Unreadable(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => info!("Loaded environment file: {}", path.display()),
            Self::Absent => debug!("No .env file found"),
            Self::Unreadable(reason) => warn!("Ignoring unreadable .env file: {reason}"),
        }
    }

    /// Wraps a settings error, pointing at the `.env` file when it could not be read.
    #[must_use]
    pub fn explain(&self, err: ConfigError) -> anyhow::Error {
        match self {
            Self::Unreadable(reason) => {
                anyhow::Error::new(err).context(format!(".env file could not be read: {reason}"))
            }
            Self::Loaded(_) | Self::Absent => err.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub project_name: String,

    pub database_url: String,

    pub server: ServerSettings,

    pub logging: LogSettings,

    pub database: PoolSettings,

    /// Number of tokio worker threads. 0 means one per CPU core.
    pub worker_threads: usize,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Fallback filter when `RUST_LOG` is not set.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Settings {
    /// Loads settings from the process environment. Call [`EnvFile::load`]
    /// first so `.env` values are visible.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let project_name = value(PROJECT_NAME).ok_or(ConfigError::Missing(PROJECT_NAME))?;
        let database_url = value(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;

        let mut settings = Self {
            project_name,
            database_url,
            server: ServerSettings::default(),
            logging: LogSettings::default(),
            database: PoolSettings::default(),
            worker_threads: 0,
        };

        if let Some(addr) = value("BIND_ADDR") {
            settings.server.bind_addr = parse("BIND_ADDR", addr)?;
        }
        if let Some(level) = value("LOG_LEVEL") {
            settings.logging.level = level;
        }
        if let Some(format) = value("LOG_FORMAT") {
            settings.logging.format = parse("LOG_FORMAT", format)?;
        }
        if let Some(max) = value("DB_MAX_CONNECTIONS") {
            settings.database.max_connections = parse("DB_MAX_CONNECTIONS", max)?;
        }
        if let Some(min) = value("DB_MIN_CONNECTIONS") {
            settings.database.min_connections = parse("DB_MIN_CONNECTIONS", min)?;
        }
        if let Some(threads) = value("WORKER_THREADS") {
            settings.worker_threads = parse("WORKER_THREADS", threads)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_MIN_CONNECTIONS",
                value: self.database.min_connections.to_string(),
            });
        }

        Ok(())
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
