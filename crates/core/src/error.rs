#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid measure type: {0}")]
    InvalidType(String),

    #[error("A reading for this customer, type and month already exists")]
    DoubleReport,

    #[error("Reading not found")]
    MeasureNotFound,

    #[error("No readings found")]
    MeasuresNotFound,

    #[error("Reading has already been confirmed")]
    ConfirmationDuplicate,

    #[error("Could not extract a numeric reading: {0}")]
    ExtractionUnparseable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
