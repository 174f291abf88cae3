//! Integration tests for the RandToken Worker API.
//!
//! These tests spin up a real server instance and make HTTP requests to verify
//! the complete request/response cycle.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use base64::{Engine, engine::general_purpose::URL_SAFE};
use regex::Regex;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tokio::net::TcpListener;

use randtoken_worker::api::{AppState, create_router};
use randtoken_worker::config::{AppConfig, GeneratorConfig, ObservabilityConfig, ServerConfig};
use randtoken_worker::error::{RandomResult, RandomSourceError};
use randtoken_worker::init_state;
use randtoken_worker::service::{OsRandom, RandomSource, TokenGenerator};

// ============================================================================
// Test Harness
// ============================================================================

/// A random source whose device has gone away.
struct BrokenSource;

impl RandomSource for BrokenSource {
    fn read(&self, _buf: &mut [u8]) -> RandomResult<usize> {
        Err(RandomSourceError::Unavailable("simulated failure".to_string()))
    }
}

/// A random source that always returns the same byte.
struct StuckSource;

impl RandomSource for StuckSource {
    fn read(&self, buf: &mut [u8]) -> RandomResult<usize> {
        buf.fill(0);
        Ok(buf.len())
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
        },
        generator: GeneratorConfig {
            default_length: 32,
            max_length: 20_000,
        },
        observability: ObservabilityConfig {
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
            metrics_enabled: false,
        },
    }
}

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    async fn new() -> Self {
        let Ok(state) = init_state(test_config(), Arc::new(OsRandom::new())) else {
            panic!("OS random source should pass the probe");
        };
        Self::with_state(state).await
    }

    async fn with_state(state: AppState) -> Self {
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Server failed");
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn get_token(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"), "{content_type}");
        response.text().await.unwrap()
    }
}

/// API response structure.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    code: i32,
    #[allow(dead_code)]
    message: String,
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn is_success(&self) -> bool {
        self.code == 0
    }
}

async fn json<T: for<'de> Deserialize<'de>>(response: Response) -> ApiResponse<T> {
    let text = response.text().await.unwrap();
    serde_json::from_str(&text).unwrap()
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[derive(Debug, Deserialize)]
struct HealthData {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ReadyData {
    ready: bool,
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<HealthData> = json(response).await;
    assert!(body.is_success());
    assert_eq!(body.data.unwrap().status, "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<ReadyData> = json(response).await;
    assert!(body.is_success());
    assert!(body.data.unwrap().ready);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("randtoken_up"));
}

// ============================================================================
// Help Page Tests
// ============================================================================

#[tokio::test]
async fn test_help_page() {
    let server = TestServer::new().await;
    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    for kind in ["number", "hex", "alpha", "alphanum", "special", "any"] {
        assert!(text.contains(&format!("<li>{kind}:")), "{kind}");
    }
    assert!(text.contains("Default length is 32"));
}

// ============================================================================
// Token Generation Tests
// ============================================================================

#[tokio::test]
async fn test_number_with_length() {
    let server = TestServer::new().await;
    let token = server.get_token("/get/number/10").await;
    assert!(Regex::new("^[0-9]{10}$").unwrap().is_match(&token), "{token}");
}

#[tokio::test]
async fn test_alphanum_zero_or_missing_length_uses_default() {
    let server = TestServer::new().await;
    let pattern = Regex::new("^[A-Za-z0-9]{32}$").unwrap();

    for path in ["/get/alphanum/0", "/get/alphanum/", "/get/alphanum"] {
        let token = server.get_token(path).await;
        assert!(pattern.is_match(&token), "{path}: {token}");
    }
}

#[tokio::test]
async fn test_non_numeric_length_uses_default() {
    let server = TestServer::new().await;
    let pattern = Regex::new("^[A-Za-z]{32}$").unwrap();

    for path in ["/get/alpha/abc", "/get/alpha/-4", "/get/alpha/7x"] {
        let token = server.get_token(path).await;
        assert!(pattern.is_match(&token), "{path}: {token}");
    }
}

#[tokio::test]
async fn test_any_is_url_safe_base64() {
    let server = TestServer::new().await;
    let token = server.get_token("/get/any/16").await;

    assert!(
        Regex::new("^[A-Za-z0-9_-]+=*$").unwrap().is_match(&token),
        "{token}"
    );
    assert_eq!(URL_SAFE.decode(&token).unwrap().len(), 16);
}

#[tokio::test]
async fn test_every_kind() {
    let server = TestServer::new().await;
    let cases = [
        ("hex", "^[0-9a-f]{64}$"),
        ("alpha", "^[A-Za-z]{64}$"),
        ("special", "^[\\x20-\\x7E]{64}$"),
        ("number", "^[0-9]{64}$"),
    ];

    for (kind, pattern) in cases {
        let token = server.get_token(&format!("/get/{kind}/64")).await;
        assert!(Regex::new(pattern).unwrap().is_match(&token), "{kind}: {token}");
    }
}

#[tokio::test]
async fn test_large_length_is_clamped() {
    let server = TestServer::new().await;
    let token = server.get_token("/get/number/50000").await;
    assert_eq!(token.len(), 20_000);

    let token = server.get_token("/get/number/10000").await;
    assert_eq!(token.len(), 10_000);
}

#[tokio::test]
async fn test_tokens_differ_between_requests() {
    let server = TestServer::new().await;
    let mut seen = HashSet::new();
    for _ in 0..50 {
        assert!(seen.insert(server.get_token("/get/alphanum/16").await));
    }
}

#[tokio::test]
async fn test_unknown_kind_is_not_found() {
    let server = TestServer::new().await;

    for path in ["/get/bogus/5", "/get/bogus", "/get/NUMBER/5"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        let body: ApiResponse<()> = json(response).await;
        assert_eq!(body.code, 4002);
    }
}

#[tokio::test]
async fn test_undecodable_length_uses_default() {
    let server = TestServer::new().await;
    let pattern = Regex::new("^[0-9]{32}$").unwrap();

    for path in ["/get/number/%FF", "/get/number/%C3%28", "/get/%6Eumber/%FF"] {
        let token = server.get_token(path).await;
        assert!(pattern.is_match(&token), "{path}: {token}");
    }
}

#[tokio::test]
async fn test_undecodable_kind_is_not_found() {
    let server = TestServer::new().await;

    for path in ["/get/%FF/5", "/get/%FF", "/get/%FF/", "/get/%FF/%FF"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        let body: ApiResponse<()> = json(response).await;
        assert_eq!(body.code, 4002, "{path}");
    }
}

#[tokio::test]
async fn test_unmatched_route_is_not_found() {
    let server = TestServer::new().await;
    let response = server.get("/get/number/5/extra").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.get("/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = TestServer::new().await;
    let response = server.get("/get/number/4").await;
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Random Source Failure Tests
// ============================================================================

#[tokio::test]
async fn test_startup_probe_rejects_broken_source() {
    let Err(err) = init_state(test_config(), Arc::new(BrokenSource)) else {
        panic!("broken source must not pass the probe");
    };
    assert!(matches!(err, RandomSourceError::Unavailable(_)));

    let Err(err) = init_state(test_config(), Arc::new(StuckSource)) else {
        panic!("stuck source must not pass the probe");
    };
    assert_eq!(err, RandomSourceError::Degenerate);
}

#[tokio::test]
async fn test_request_time_failure_is_internal_error() {
    let generator = TokenGenerator::new(Arc::new(BrokenSource));
    let server = TestServer::with_state(AppState::new(Arc::new(test_config()), generator)).await;

    let response = server.get("/get/number/10").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ApiResponse<()> = json(response).await;
    assert_eq!(body.code, 5001);
    assert!(body.data.is_none());

    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ApiResponse<ReadyData> = json(response).await;
    assert!(!body.data.unwrap().ready);
}
