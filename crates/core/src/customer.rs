//! Placeholder identity derivation for implicitly provisioned customers.
//!
//! There is no registration flow; a customer record is created lazily on
//! first ingestion. The derivation is deterministic so provisioning is
//! reproducible and testable.

/// Display name for an auto-provisioned customer.
pub fn placeholder_name(customer_code: &str) -> String {
    format!("Customer {customer_code}")
}

/// Placeholder email for an auto-provisioned customer.
pub fn placeholder_email(customer_code: &str) -> String {
    format!("customer_{customer_code}@placeholder")
}
