#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use meterwise_api::config::{GeminiConfig, ServerConfig};
use meterwise_api::routes;
use meterwise_api::state::AppState;
use meterwise_api::storage::ImageStore;
use meterwise_gemini::{ExtractorError, ValueExtractor};

// ---------------------------------------------------------------------------
// Stub extractor
// ---------------------------------------------------------------------------

/// Scripted stand-in for the Gemini client.
///
/// Returns a fixed response (or a fixed failure) and counts invocations so
/// tests can assert the external service was, or was not, called.
pub struct StubExtractor {
    response: Result<String, u16>,
    pub calls: AtomicUsize,
}

impl StubExtractor {
    /// Stub that replies with the given text.
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Stub whose every call fails with the given HTTP status.
    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            response: Err(status),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValueExtractor for StubExtractor {
    async fn extract_reading(
        &self,
        _mime_type: &str,
        _base64_data: &str,
    ) -> Result<String, ExtractorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ExtractorError::Api {
                status: *status,
                body: "service unavailable".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: storage_root.to_path_buf(),
        gemini: GeminiConfig {
            api_url: "http://gemini.invalid".to_string(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, a stub
/// extractor, and a temporary storage directory.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses. The returned
/// `TempDir` keeps the storage directory alive for the test's duration.
pub fn build_test_app(
    pool: PgPool,
    extractor: Arc<dyn ValueExtractor>,
) -> (Router, tempfile::TempDir) {
    let storage = tempfile::tempdir().expect("create storage tempdir");
    let config = test_config(storage.path());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        extractor,
        store: Arc::new(ImageStore::new(storage.path())),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = routes::router(&config.storage_root)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (app, storage)
}

/// Build a test app with a stub extractor that replies `"123.45"`.
pub fn default_test_app(pool: PgPool) -> (Router, tempfile::TempDir) {
    build_test_app(pool, StubExtractor::replying("123.45"))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 1x1 transparent PNG, base64-encoded.
pub const PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// A valid `POST /upload` body for the given customer/type/datetime.
pub fn upload_body(
    customer_code: &str,
    measure_type: &str,
    measure_datetime: &str,
) -> serde_json::Value {
    serde_json::json!({
        "image": format!("data:image/png;base64,{PNG_BASE64}"),
        "customer_code": customer_code,
        "measure_datetime": measure_datetime,
        "measure_type": measure_type,
    })
}

/// Row counts used to assert that failed requests wrote nothing.
pub async fn table_counts(pool: &PgPool) -> (i64, i64) {
    let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await
        .unwrap();
    let readings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
        .fetch_one(pool)
        .await
        .unwrap();
    (customers, readings)
}
