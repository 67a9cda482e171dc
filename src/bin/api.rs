//! Aadhaar user service binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use aadhaar_users::api::{self, ApiError, Config};
use aadhaar_users::db::{DbConfig, DbError, SqliteDatabase};
use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(aadhaar_users::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(aadhaar_users::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(aadhaar_users::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "aadhaar-users-api")]
#[command(author, version, about = "Aadhaar user record service", long_about = None)]
struct Cli {
    /// Host address to bind to [env: AADHAAR_HOST, default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [env: AADHAAR_PORT, default: 3015]
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path [env: AADHAAR_DB_PATH, default: ./aadhaar_users.db]
    #[arg(long)]
    db: Option<PathBuf>,

    /// Maximum pooled database connections [env: AADHAAR_DB_MAX_CONNECTIONS, default: 5]
    #[arg(long)]
    max_connections: Option<u32>,

    /// Connections kept open while idle [default: 1]
    #[arg(long)]
    min_connections: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let mut config = Config::new();
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    let mut db_config = DbConfig::from_env();
    if let Some(path) = cli.db {
        db_config.database_path = path;
    }
    if let Some(max) = cli.max_connections {
        db_config = db_config.max_connections(max);
    }
    if let Some(min) = cli.min_connections {
        db_config = db_config.min_connections(min);
    }

    // Ensure parent directory exists
    if let Some(parent) = db_config.database_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    // Migrations run as part of connect
    let db = SqliteDatabase::connect(db_config).await?;

    // Pass the abstract Database to the API layer
    let result = api::run(config, db.clone()).await;

    db.close().await;
    info!("Shutdown complete");

    result?;
    Ok(())
}
