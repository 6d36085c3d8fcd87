//! Domain logic for the meterwise platform.
//!
//! Pure, I/O-free building blocks shared by the database and API layers:
//! measure types, the uploaded-image codec, the extraction-response value
//! parser, timestamp parsing, and customer placeholder derivation.

pub mod customer;
pub mod datetime;
pub mod error;
pub mod extraction;
pub mod image;
pub mod measure;
