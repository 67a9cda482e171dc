//! SQLite connection pool and migration management.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::{debug, info};

use super::user::SqliteUserRepository;
use crate::db::{Database, DbError, DbResult};

/// Embedded migrations from `migrations/` at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const IN_MEMORY_PATH: &str = ":memory:";

/// Database configuration.
///
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/aadhaar/users.db")
///     .max_connections(10)
///     .min_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to keep alive.
    pub min_connections: u32,
    /// How long to wait for a free connection.
    pub acquire_timeout: Duration,
    /// Idle time before a connection is closed. `None` keeps connections forever.
    pub idle_timeout: Option<Duration>,
    /// Whether to run migrations on connect.
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Configuration from `AADHAAR_DB_PATH` and `AADHAAR_DB_MAX_CONNECTIONS`.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let path = env::var("AADHAAR_DB_PATH").unwrap_or_else(|_| "aadhaar_users.db".to_string());
        let config = Self::new(path);
        match env::var("AADHAAR_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            Some(max) => config.max_connections(max),
            None => config,
        }
    }

    /// In-memory database on a single, never-recycled connection.
    ///
    /// Every SQLite connection to `:memory:` is a separate database, so the
    /// pool must not open a second one or drop the first.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    /// At least one; lowers `min_connections` if it would exceed the new maximum.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }

    /// Capped at `max_connections`.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min.min(self.max_connections);
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                DbError::Connection {
                    message: e.to_string(),
                }
            });
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

/// SQLite database implementation.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open the pool described by `config`, running migrations if enabled.
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let options = config.connect_options()?;
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Self { pool };
        if config.run_migrations {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Open a database file at the given path with default pool settings.
    pub async fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        Self::connect(DbConfig::new(path)).await
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        Self::connect(DbConfig::in_memory()).await
    }

    /// Direct pool access for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Users<'a> = SqliteUserRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        debug!("Running database migrations");
        MIGRATOR.run(&self.pool).await?;
        info!("Database migrations complete");
        Ok(())
    }

    fn users(&self) -> Self::Users<'_> {
        SqliteUserRepository { pool: &self.pool }
    }
}
