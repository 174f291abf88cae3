//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::TokenGenerator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token generator.
    pub generator: Arc<TokenGenerator>,
    /// Prometheus handle, when the recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The generator is expected to have passed
    /// [`TokenGenerator::initialize`] already.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, generator: TokenGenerator) -> Self {
        Self {
            config,
            generator: Arc::new(generator),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
