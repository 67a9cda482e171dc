mod handlers;
mod routes;
mod state;

#[cfg(test)]
mod mod_test;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use handlers::{ErrorResponse, HealthResponse};
pub use routes::{ApiDoc, create_router};
pub use state::AppState;

/// Port the service listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3015;

/// Maximum accepted request body size (16 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// API server errors
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(aadhaar_users::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(aadhaar_users::api::serve))]
    Serve(#[from] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Request body limit in bytes
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Config {
    /// Defaults overridden by `AADHAAR_HOST` / `AADHAAR_PORT` when set.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn new() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("AADHAAR_HOST") {
            match raw.parse() {
                Ok(host) => config.host = host,
                Err(_) => warn!(value = %raw, "Ignoring invalid AADHAAR_HOST"),
            }
        }
        if let Ok(raw) = env::var("AADHAAR_PORT") {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!(value = %raw, "Ignoring invalid AADHAAR_PORT"),
            }
        }

        config
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aadhaar_users=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server until Ctrl+C or SIGTERM.
///
/// In-flight requests are drained before this returns; closing the
/// database is left to the caller.
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ApiError> {
    let state = AppState::new(db);
    let app = create_router(state, config.body_limit).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("API server listening on http://{}", addr);
    info!("API docs available at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
