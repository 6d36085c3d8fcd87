pub mod health;
pub mod readings;

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the full route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                      service + database health
/// /upload                      ingest a reading (POST)
/// /confirm                     confirm a reading (PATCH)
/// /{customer_code}/list        list a customer's readings (GET)
/// /images/{filename}           stored image artifacts (static)
/// ```
pub fn router(storage_root: &Path) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(readings::router())
        .nest_service("/images", ServeDir::new(storage_root))
}
