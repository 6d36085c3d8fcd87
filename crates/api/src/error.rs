use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use meterwise_core::error::CoreError;
use meterwise_core::image::ImageError;
use meterwise_gemini::ExtractorError;

/// Example shown alongside the unsupported-image-type rejection.
const IMAGE_EXAMPLE: &str =
    "Valid example: data:image/jpg;base64,/9j/4AAQSkZJRgABAQEASABIAAD...";

/// Application-level error type for HTTP handlers.
///
/// Wraps domain, database and extraction-service errors and implements
/// [`IntoResponse`] to produce the uniform
/// `{error_code, error_description}` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `meterwise_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An uploaded image failed the codec checks.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The extraction service call failed.
    #[error("Extraction service error: {0}")]
    Extraction(#[from] ExtractorError),

    /// The request body failed JSON extraction (malformed, wrong types,
    /// missing fields).
    #[error("Invalid request body: {0}")]
    JsonRejection(#[from] JsonRejection),

    /// Filesystem error while persisting an image artifact.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, example) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidData(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_DATA", msg.clone(), None)
                }
                CoreError::InvalidType(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_TYPE", msg.clone(), None)
                }
                CoreError::DoubleReport => (
                    StatusCode::CONFLICT,
                    "DOUBLE_REPORT",
                    "Monthly reading already recorded".to_string(),
                    None,
                ),
                CoreError::MeasureNotFound => (
                    StatusCode::NOT_FOUND,
                    "MEASURE_NOT_FOUND",
                    "Reading not found".to_string(),
                    None,
                ),
                CoreError::MeasuresNotFound => (
                    StatusCode::NOT_FOUND,
                    "MEASURES_NOT_FOUND",
                    "No readings found".to_string(),
                    None,
                ),
                CoreError::ConfirmationDuplicate => (
                    StatusCode::CONFLICT,
                    "CONFIRMATION_DUPLICATE",
                    "Reading has already been confirmed".to_string(),
                    None,
                ),
                CoreError::ExtractionUnparseable(detail) => {
                    tracing::warn!(detail = %detail, "Extraction response unparseable");
                    (
                        StatusCode::BAD_REQUEST,
                        "INVALID_DATA",
                        "Could not extract a numeric reading from the image".to_string(),
                        None,
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Image codec failures ---
            AppError::Image(img) => {
                let example = match img {
                    ImageError::UnsupportedType => Some(IMAGE_EXAMPLE),
                    _ => None,
                };
                (StatusCode::BAD_REQUEST, "INVALID_DATA", img.to_string(), example)
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Extraction service failures ---
            AppError::Extraction(err) => {
                tracing::error!(error = %err, "Extraction service call failed");
                internal_error()
            }

            // --- Transport-level body rejections ---
            AppError::JsonRejection(rejection) => (
                StatusCode::BAD_REQUEST,
                "INVALID_DATA",
                rejection.body_text(),
                None,
            ),

            // --- Storage failures ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Failed to persist image artifact");
                internal_error()
            }
        };

        let mut body = json!({
            "error_code": code,
            "error_description": message,
        });
        if let Some(example) = example {
            body["example"] = json!(example);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String, Option<&'static str>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal server error occurred".to_string(),
        None,
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Unique-constraint violations on `uq_`-prefixed constraints are double
///   reports (the race-closing month index fired) and map to 409.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(
    err: &sqlx::Error,
) -> (StatusCode, &'static str, String, Option<&'static str>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "MEASURE_NOT_FOUND",
            "Reading not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505.
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
            {
                return (
                    StatusCode::CONFLICT,
                    "DOUBLE_REPORT",
                    "Monthly reading already recorded".to_string(),
                    None,
                );
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
