use std::sync::Arc;

use meterwise_gemini::ValueExtractor;

use crate::config::ServerConfig;
use crate::storage::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: meterwise_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Extraction service client. A trait object so tests can substitute a
    /// scripted stub.
    pub extractor: Arc<dyn ValueExtractor>,
    /// Image artifact storage.
    pub store: Arc<ImageStore>,
}
