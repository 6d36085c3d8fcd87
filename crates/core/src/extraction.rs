//! Defensive parsing of the extraction service's free-text response.
//!
//! The service is prompted to respond with only the number but is not
//! guaranteed to. The parser strips everything that is not a digit or a
//! decimal point, then reads the longest valid leading number. Absence of a
//! parseable number is a hard failure; the parser never substitutes zero.

use crate::error::CoreError;

/// Extract a floating-point reading from arbitrary response text.
///
/// Rule: drop every character outside `[0-9.]`, then take the longest
/// leading run of the form `digits [ '.' digits ]` (a second decimal point
/// terminates the number). The run must contain at least one digit.
pub fn parse_extracted_value(text: &str) -> Result<f64, CoreError> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in stripped.chars() {
        match c {
            '.' if seen_dot => break,
            '.' => seen_dot = true,
            _ => seen_digit = true,
        }
        end += 1;
    }

    if !seen_digit {
        return Err(CoreError::ExtractionUnparseable(format!(
            "no numeric value in extraction response: {text:?}"
        )));
    }

    let number = &stripped[..end];
    number.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
        CoreError::ExtractionUnparseable(format!(
            "extraction response did not parse as a number: {text:?}"
        ))
    })
}
