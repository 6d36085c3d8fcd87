//! Customer entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `customers` table.
///
/// Customers are created lazily on first ingestion and never updated or
/// deleted; `customer_code` is the external identifier.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub customer_code: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
