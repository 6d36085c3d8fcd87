//! Measure type enumeration and its two parsing modes.
//!
//! Ingestion validates `measure_type` with an exact, case-sensitive match;
//! the listing filter normalizes to uppercase first. Both live here so the
//! asymmetry is explicit and tested.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of utility meter a reading was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasureType {
    Water,
    Gas,
}

impl MeasureType {
    /// Canonical uppercase token stored in the database and used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            MeasureType::Water => "WATER",
            MeasureType::Gas => "GAS",
        }
    }

    /// Exact-match parse for ingestion. `"water"` and `"Water"` are rejected.
    pub fn parse_exact(s: &str) -> Result<Self, CoreError> {
        match s {
            "WATER" => Ok(MeasureType::Water),
            "GAS" => Ok(MeasureType::Gas),
            other => Err(CoreError::InvalidData(format!(
                "Invalid measure type (must be WATER or GAS): {other}"
            ))),
        }
    }

    /// Case-insensitive parse for the listing filter.
    pub fn parse_filter(s: &str) -> Result<Self, CoreError> {
        match s.to_uppercase().as_str() {
            "WATER" => Ok(MeasureType::Water),
            "GAS" => Ok(MeasureType::Gas),
            _ => Err(CoreError::InvalidType(
                "Measure type filter must be WATER or GAS".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for MeasureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
