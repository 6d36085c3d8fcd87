use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// Mount the reading workflow routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(readings::upload))
        .route("/confirm", patch(readings::confirm))
        .route("/{customer_code}/list", get(readings::list))
}
