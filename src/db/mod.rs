use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use sea_orm::{
    ConnectOptions, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, Statement,
    TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Settings;

pub mod migrator;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to prepare database file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Process-wide connection pool plus the factory for [`Session`]s.
///
/// Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct Database {
    conn: DatabaseConnection,
    open_sessions: Arc<AtomicUsize>,
}

impl Database {
    pub async fn connect(settings: &Settings) -> Result<Self, DbError> {
        Self::with_pool_options(
            &settings.database_url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, DbError> {
        prepare_sqlite_file(db_url).await?;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = sea_orm::Database::connect(opt).await?;

        info!(
            backend = ?conn.get_database_backend(),
            "Database connected (pool: {}-{})", min_connections, max_connections
        );

        Ok(Self {
            conn,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        })
    }

    #[must_use]
    pub const fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Applies every pending migration.
    pub async fn migrate(&self) -> Result<(), DbError> {
        migrator::Migrator::up(&self.conn, None).await?;
        info!("Migrations applied");
        Ok(())
    }

    /// Reverts the last `steps` applied migrations.
    pub async fn rollback_migrations(&self, steps: u32) -> Result<(), DbError> {
        migrator::Migrator::down(&self.conn, Some(steps)).await?;
        info!("Reverted {} migration(s)", steps);
        Ok(())
    }

    /// Drops every table and reapplies all migrations.
    pub async fn reset_schema(&self) -> Result<(), DbError> {
        migrator::Migrator::fresh(&self.conn).await?;
        warn!("Schema dropped and recreated");
        Ok(())
    }

    /// Migration names in order, paired with whether each has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbError> {
        let applied = migrator::Migrator::get_applied_migrations(&self.conn).await?;
        let pending = migrator::Migrator::get_pending_migrations(&self.conn).await?;

        Ok(applied
            .iter()
            .map(|m| (m.name().to_string(), true))
            .chain(pending.iter().map(|m| (m.name().to_string(), false)))
            .collect())
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Opens a new unit of work. Nothing touches the database until the
    /// session's first [`Session::tx`] call.
    #[must_use]
    pub fn session(&self) -> Session {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Session {
            conn: self.conn.clone(),
            txn: None,
            _guard: SessionGuard(Arc::clone(&self.open_sessions)),
        }
    }

    /// Runs `f` inside a fresh session and closes it afterwards, whether `f`
    /// succeeded or not. Work that `f` did not commit is rolled back.
    ///
    /// ```ignore
    /// db.with_session(|session| Box::pin(async move {
    ///     let user = user.insert(session.tx().await?).await?;
    ///     session.commit().await?;
    ///     Ok::<_, DbErr>(user)
    /// }))
    /// .await?;
    /// ```
    pub async fn with_session<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: for<'s> FnOnce(&'s mut Session) -> BoxFuture<'s, Result<T, E>>,
    {
        let mut session = self.session();
        let result = f(&mut session).await;
        session.close().await;
        result
    }

    /// Number of sessions that have been opened and not yet closed.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    pub async fn close(self) -> Result<(), DbError> {
        let open = self.open_sessions();
        if open > 0 {
            warn!("Closing database pool with {} session(s) still open", open);
        }
        self.conn.close().await?;
        info!("Database pool closed");
        Ok(())
    }
}

/// A non-autocommitting unit of work.
///
/// The first [`Session::tx`] call begins a transaction; [`Session::commit`]
/// ends it and the next `tx` begins another. Dropping or closing the session
/// rolls back anything not yet committed.
pub struct Session {
    conn: DatabaseConnection,
    txn: Option<DatabaseTransaction>,
    _guard: SessionGuard,
}

impl Session {
    /// The current transaction, begun on demand.
    pub async fn tx(&mut self) -> Result<&DatabaseTransaction, DbErr> {
        let txn = match self.txn.take() {
            Some(txn) => txn,
            None => {
                debug!("Session transaction begun");
                self.conn.begin().await?
            }
        };
        Ok(self.txn.insert(txn))
    }

    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.txn.is_some()
    }

    pub async fn commit(&mut self) -> Result<(), DbErr> {
        if let Some(txn) = self.txn.take() {
            txn.commit().await?;
            debug!("Session transaction committed");
        }
        Ok(())
    }

    pub async fn rollback(&mut self) -> Result<(), DbErr> {
        if let Some(txn) = self.txn.take() {
            txn.rollback().await?;
            debug!("Session transaction rolled back");
        }
        Ok(())
    }

    /// Rolls back pending work and releases the session.
    pub async fn close(mut self) {
        if let Err(e) = self.rollback().await {
            warn!("Rollback while closing session failed: {}", e);
        }
    }
}

struct SessionGuard(Arc<AtomicUsize>);

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Creates the file (and parent directory) behind a file-backed `SQLite` URL.
async fn prepare_sqlite_file(db_url: &str) -> Result<(), DbError> {
    let Some(path_str) = sqlite_file_path(db_url) else {
        return Ok(());
    };

    let path = Path::new(path_str);
    let file_err = |source| DbError::File {
        path: path_str.to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(file_err)?;
    }

    if !tokio::fs::try_exists(path).await.map_err(file_err)? {
        tokio::fs::File::create(path).await.map_err(file_err)?;
        debug!("Created database file {}", path.display());
    }

    Ok(())
}

fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);

    if path.is_empty() || path.contains(":memory:") || path.starts_with("file:") {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_file_path_variants() {
        assert_eq!(sqlite_file_path("sqlite:data/inkwell.db"), Some("data/inkwell.db"));
        assert_eq!(sqlite_file_path("sqlite://data/inkwell.db"), Some("data/inkwell.db"));
        assert_eq!(sqlite_file_path("sqlite:///tmp/inkwell.db"), Some("/tmp/inkwell.db"));
        assert_eq!(
            sqlite_file_path("sqlite://inkwell.db?mode=rwc"),
            Some("inkwell.db")
        );
    }

    #[test]
    fn sqlite_file_path_skips_non_files() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_file_path("sqlite:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/inkwell"), None);
    }

    #[test]
    fn db_error_wraps_db_err() {
        let err: DbError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, DbError::Db(_)));
        assert!(err.to_string().contains("boom"));
    }
}
