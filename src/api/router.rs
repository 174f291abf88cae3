//! Router setup and configuration.

use axum::{Router, http::Uri, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, help, token};
use crate::api::middleware::access_log::access_log;
use crate::api::state::AppState;
use crate::error::AppError;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health and metrics routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    // Token routes; an unknown kind is rejected by the handler with 404
    let token_routes = Router::new()
        .route("/{kind}", get(token::generate_default))
        .route("/{kind}/", get(token::generate_default))
        .route("/{kind}/{length}", get(token::generate_with_length));

    Router::new()
        .route("/", get(help::help))
        .merge(health_routes)
        .nest("/get", token_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(access_log)),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
