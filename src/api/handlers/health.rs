//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, HealthResponse, ReadyComponents, ReadyResponse};
use crate::error::ErrorCode;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness probe - checks that the random source still delivers.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<ReadyResponse>>) {
    let source_ok = state.generator.probe().is_ok();

    let data = ReadyResponse {
        ready: source_ok,
        components: ReadyComponents {
            random_source: source_ok,
        },
    };

    if source_ok {
        (StatusCode::OK, Json(ApiResponse::success(data)))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure(
                ErrorCode::SERVICE_UNAVAILABLE.as_i32(),
                "service unavailable",
                data,
            )),
        )
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.as_ref().map_or_else(
        || {
            let mut output = String::new();
            output.push_str("# HELP randtoken_up Whether the service is up\n");
            output.push_str("# TYPE randtoken_up gauge\n");
            output.push_str("randtoken_up 1\n");
            output
        },
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}
