//! Reading entity models and DTOs.
//!
//! The backing table is `images` (pre-existing schema name); a row models
//! one meter reading with its confirmation state.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A full row from the `images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reading {
    pub measure_uuid: Uuid,
    pub customer_code: String,
    pub image_url: String,
    pub measure_datetime: NaiveDateTime,
    pub measure_type: String,
    pub measure_value: f64,
    pub has_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// DTO for inserting a new reading at the end of the ingestion workflow.
#[derive(Debug, Clone)]
pub struct NewReading {
    pub measure_uuid: Uuid,
    pub customer_code: String,
    pub image_url: String,
    pub measure_datetime: NaiveDateTime,
    pub measure_type: String,
    pub measure_value: f64,
}

/// Listing projection: the columns exposed by `GET /{customer_code}/list`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadingSummary {
    pub measure_uuid: Uuid,
    pub measure_datetime: NaiveDateTime,
    pub measure_type: String,
    pub has_confirmed: bool,
    pub image_url: String,
}
