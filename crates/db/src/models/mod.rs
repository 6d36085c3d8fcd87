pub mod customer;
pub mod reading;

pub use customer::Customer;
pub use reading::{NewReading, Reading, ReadingSummary};
