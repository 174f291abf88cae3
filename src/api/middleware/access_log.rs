//! Per-request access log.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Log method, path, peer address, status and latency of every request.
///
/// The peer address is only known when the server was started with
/// connect info.
pub async fn access_log(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());

    let start = Instant::now();
    let response = next.run(req).await;

    info!(
        %method,
        path = %path,
        remote = remote.as_deref().unwrap_or("-"),
        status = response.status().as_u16(),
        latency_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        "Request served"
    );

    response
}
