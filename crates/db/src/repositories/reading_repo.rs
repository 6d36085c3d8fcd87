//! Repository for meter readings (the `images` table).

use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewReading, Reading, ReadingSummary};

/// Column list for full `images` rows.
const READING_COLUMNS: &str = "\
    measure_uuid, customer_code, image_url, measure_datetime, \
    measure_type, measure_value, has_confirmed, created_at";

/// Column list for the listing projection.
const SUMMARY_COLUMNS: &str =
    "measure_uuid, measure_datetime, measure_type, has_confirmed, image_url";

/// Provides queries and mutations over readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Whether a reading already exists for this customer/type in the same
    /// calendar month as `measure_datetime`.
    pub async fn exists_for_month(
        pool: &PgPool,
        customer_code: &str,
        measure_type: &str,
        measure_datetime: NaiveDateTime,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 FROM images \
                WHERE customer_code = $1 \
                  AND measure_type = $2 \
                  AND date_trunc('month', measure_datetime) = date_trunc('month', $3)\
             )",
        )
        .bind(customer_code)
        .bind(measure_type)
        .bind(measure_datetime)
        .fetch_one(pool)
        .await
    }

    /// Insert a new reading.
    ///
    /// The `uq_images_customer_type_month` index makes a concurrent
    /// duplicate insert fail with a 23505 the caller classifies as a
    /// double report.
    pub async fn insert(pool: &PgPool, input: &NewReading) -> Result<Reading, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (\
                measure_uuid, customer_code, image_url, \
                measure_datetime, measure_type, measure_value\
             ) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {READING_COLUMNS}"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(input.measure_uuid)
            .bind(&input.customer_code)
            .bind(&input.image_url)
            .bind(input.measure_datetime)
            .bind(&input.measure_type)
            .bind(input.measure_value)
            .fetch_one(pool)
            .await
    }

    /// Find a reading by its UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        measure_uuid: Uuid,
    ) -> Result<Option<Reading>, sqlx::Error> {
        let query = format!("SELECT {READING_COLUMNS} FROM images WHERE measure_uuid = $1");
        sqlx::query_as::<_, Reading>(&query)
            .bind(measure_uuid)
            .fetch_optional(pool)
            .await
    }

    /// Apply a confirmation: overwrite the value and set the flag.
    ///
    /// Only flips unconfirmed rows; returns whether a row was updated, so a
    /// lost race against another confirmation reads as not-updated rather
    /// than a silent re-apply.
    pub async fn confirm(
        pool: &PgPool,
        measure_uuid: Uuid,
        confirmed_value: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE images SET measure_value = $1, has_confirmed = TRUE \
             WHERE measure_uuid = $2 AND has_confirmed = FALSE",
        )
        .bind(confirmed_value)
        .bind(measure_uuid)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List readings for a customer, optionally filtered by measure type.
    /// Insertion order, no pagination.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_code: &str,
        measure_type: Option<&str>,
    ) -> Result<Vec<ReadingSummary>, sqlx::Error> {
        match measure_type {
            Some(mtype) => {
                let query = format!(
                    "SELECT {SUMMARY_COLUMNS} FROM images \
                     WHERE customer_code = $1 AND measure_type = $2"
                );
                sqlx::query_as::<_, ReadingSummary>(&query)
                    .bind(customer_code)
                    .bind(mtype)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {SUMMARY_COLUMNS} FROM images WHERE customer_code = $1");
                sqlx::query_as::<_, ReadingSummary>(&query)
                    .bind(customer_code)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
