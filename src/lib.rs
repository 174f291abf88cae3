//! # RandToken Worker
//!
//! An HTTP service that returns cryptographically random tokens. The caller
//! picks the character domain and the length through the request path:
//!
//! - **number**: `0-9`
//! - **hex**: `0-9a-f`
//! - **alpha**: `A-Za-z`
//! - **alphanum**: `0-9A-Za-z`
//! - **special**: printable ASCII, `0x20..=0x7E`
//! - **any**: raw bytes, URL-safe base64 encoded
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Worker Service                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────────┐  ┌──────────────────┐  │
//! │  │  API Layer  │  │ Token Generator │  │ OS Random Source │  │
//! │  │  (Axum)     │→ │  (charsets)     │→ │  (OsRng)         │  │
//! │  └─────────────┘  └─────────────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::error::RandomSourceError;
use crate::service::{OsRandom, RandomSource, TokenGenerator};

/// Initialize the token generator over `source` and build the handler state.
///
/// This is the initialization phase: it fails, and nothing may be served,
/// when the random source does not pass the startup probe.
///
/// # Errors
///
/// Returns the probe failure.
pub fn init_state(
    config: AppConfig,
    source: Arc<dyn RandomSource>,
) -> Result<AppState, RandomSourceError> {
    let generator = TokenGenerator::initialize(source)?;
    Ok(AppState::new(Arc::new(config), generator))
}

/// Run the token service.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Verifies the OS random source
/// 3. Installs the metrics recorder
/// 4. Starts the HTTP server
/// 5. Handles graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The secure random source fails its startup probe
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting RandToken Worker"
    );

    let mut state = init_state(config.clone(), Arc::new(OsRandom::new())).inspect_err(|e| {
        error!(error = %e, "Secure random source check failed, refusing to start");
    })?;

    if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
        info!("Prometheus recorder installed");
    }

    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
