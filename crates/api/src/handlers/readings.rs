//! Handlers for the reading workflows: upload, confirmation, and listing.

use axum::extract::{Path, Query, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meterwise_core::datetime::parse_measure_datetime;
use meterwise_core::error::CoreError;
use meterwise_core::extraction::parse_extracted_value;
use meterwise_core::image::decode_data_uri;
use meterwise_core::measure::MeasureType;
use meterwise_db::models::{NewReading, ReadingSummary};
use meterwise_db::repositories::{CustomerRepo, ReadingRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub image: String,
    pub customer_code: String,
    pub measure_datetime: String,
    pub measure_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub image_url: String,
    pub measure_value: f64,
    pub measure_uuid: Uuid,
}

/// POST /upload
///
/// Ingest one meter photograph: validate, provision the customer, enforce
/// monthly uniqueness, extract the reading via the vision service, persist
/// the artifact and the row.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<UploadRequest>,
) -> AppResult<Json<UploadResponse>> {
    // Validating: image codec, measure type (case-sensitive), datetime.
    let decoded = decode_data_uri(&input.image)?;
    let measure_type = MeasureType::parse_exact(&input.measure_type)?;
    let measure_datetime = parse_measure_datetime(&input.measure_datetime)?;

    // CustomerEnsuring: implicit provisioning, a no-op for known customers.
    CustomerRepo::ensure(&state.pool, &input.customer_code).await?;

    // DuplicateChecking: the common case answers here without touching the
    // extraction service; the unique month index covers concurrent uploads
    // that slip past this check.
    let duplicate = ReadingRepo::exists_for_month(
        &state.pool,
        &input.customer_code,
        measure_type.as_str(),
        measure_datetime,
    )
    .await?;
    if duplicate {
        return Err(AppError::Core(CoreError::DoubleReport));
    }

    // Extracting + Parsing.
    let raw_text = state
        .extractor
        .extract_reading(&decoded.mime_type(), &decoded.base64_payload)
        .await?;
    let measure_value = parse_extracted_value(&raw_text)?;

    // Persisting: artifact first, then the row.
    state.store.save(&decoded.filename, &decoded.bytes).await?;

    let image_url = format!(
        "{}/images/{}",
        request_base_url(&headers, &state),
        decoded.filename
    );

    let reading = ReadingRepo::insert(
        &state.pool,
        &NewReading {
            measure_uuid: decoded.measure_uuid,
            customer_code: input.customer_code.clone(),
            image_url,
            measure_datetime,
            measure_type: measure_type.as_str().to_string(),
            measure_value,
        },
    )
    .await?;

    tracing::info!(
        measure_uuid = %reading.measure_uuid,
        customer_code = %reading.customer_code,
        measure_type = %reading.measure_type,
        measure_value = reading.measure_value,
        "Reading ingested",
    );

    Ok(Json(UploadResponse {
        image_url: reading.image_url,
        measure_value: reading.measure_value,
        measure_uuid: reading.measure_uuid,
    }))
}

/// Base URL readings are served back under, from the request's own
/// scheme/host so the image URL is reachable through this same service.
fn request_base_url(headers: &HeaderMap, state: &AppState) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", state.config.host, state.config.port));
    format!("{scheme}://{host}")
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Taken loosely so absence and wrong types produce this API's own
    /// field-specific messages.
    pub measure_uuid: serde_json::Value,
    pub confirmed_value: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub success: bool,
}

/// PATCH /confirm
///
/// One-shot human confirmation of an extracted value. Input validation runs
/// entirely before any store access.
pub async fn confirm(
    State(state): State<AppState>,
    AppJson(input): AppJson<ConfirmRequest>,
) -> AppResult<Json<ConfirmResponse>> {
    let measure_uuid = input
        .measure_uuid
        .as_str()
        .and_then(parse_canonical_uuid)
        .ok_or_else(|| {
            CoreError::InvalidData("'measure_uuid' must be a valid UUID string".to_string())
        })?;

    // The wire type itself must be an integer: "100" and 100.5 are rejected.
    let confirmed_value = input.confirmed_value.as_i64().ok_or_else(|| {
        CoreError::InvalidData("'confirmed_value' must be an integer".to_string())
    })?;

    let reading = ReadingRepo::find_by_uuid(&state.pool, measure_uuid)
        .await?
        .ok_or(CoreError::MeasureNotFound)?;

    if reading.has_confirmed {
        return Err(AppError::Core(CoreError::ConfirmationDuplicate));
    }

    let updated =
        ReadingRepo::confirm(&state.pool, measure_uuid, confirmed_value as f64).await?;
    if !updated {
        // Lost a race against a concurrent confirmation after the fetch.
        return Err(AppError::Core(CoreError::ConfirmationDuplicate));
    }

    tracing::info!(%measure_uuid, confirmed_value, "Reading confirmed");

    Ok(Json(ConfirmResponse { success: true }))
}

/// Parse a UUID in canonical hyphenated form (case-insensitive). The
/// 36-byte length check rejects the unhyphenated and braced forms that
/// `Uuid::parse_str` would otherwise accept.
fn parse_canonical_uuid(s: &str) -> Option<Uuid> {
    if s.len() != 36 {
        return None;
    }
    Uuid::parse_str(s).ok()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub measure_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub customer_code: String,
    pub measures: Vec<ReadingSummary>,
}

/// GET /{customer_code}/list
///
/// List a customer's readings, optionally filtered by measure type
/// (case-insensitive).
pub async fn list(
    State(state): State<AppState>,
    Path(customer_code): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse>> {
    if customer_code.trim().is_empty() {
        return Err(AppError::Core(CoreError::InvalidData(
            "Customer code is required".to_string(),
        )));
    }

    let filter = query
        .measure_type
        .as_deref()
        .map(MeasureType::parse_filter)
        .transpose()?;

    let measures = ReadingRepo::list_by_customer(
        &state.pool,
        &customer_code,
        filter.map(MeasureType::as_str),
    )
    .await?;

    if measures.is_empty() {
        return Err(AppError::Core(CoreError::MeasuresNotFound));
    }

    Ok(Json(ListResponse {
        customer_code,
        measures,
    }))
}
