//! Repository for the customer directory.

use sqlx::PgPool;

use meterwise_core::customer::{placeholder_email, placeholder_name};

use crate::models::Customer;

/// Column list for `customers` queries.
const CUSTOMER_COLUMNS: &str = "customer_code, name, email, created_at";

/// Provides lookup and implicit provisioning for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Make sure a customer row exists for `customer_code`.
    ///
    /// Absent customers get a placeholder name/email derived from the code.
    /// `ON CONFLICT DO NOTHING` makes concurrent provisioning of the same
    /// unseen code a benign no-op for the losing insert.
    pub async fn ensure(pool: &PgPool, customer_code: &str) -> Result<(), sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO customers (customer_code, name, email) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (customer_code) DO NOTHING",
        )
        .bind(customer_code)
        .bind(placeholder_name(customer_code))
        .bind(placeholder_email(customer_code))
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::info!(customer_code, "Provisioned placeholder customer");
        }
        Ok(())
    }

    /// Find a customer by code.
    pub async fn find_by_code(
        pool: &PgPool,
        customer_code: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_code = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(customer_code)
            .fetch_optional(pool)
            .await
    }
}
