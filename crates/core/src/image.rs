//! Codec for uploaded meter photographs.
//!
//! Uploads arrive as a self-describing data URI
//! (`data:image/png;base64,...`). The codec checks the MIME prefix, decodes
//! the base64 payload, and assigns the storage filename. It performs no I/O;
//! writing the decoded bytes is the ingestion workflow's job.

use std::sync::LazyLock;

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use uuid::Uuid;

/// Accepted data-URI prefix. Case-sensitive, matching the declared contract.
static DATA_URI_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/(png|jpeg|jpg);base64,").expect("valid regex"));

/// A successfully decoded upload, ready for extraction and storage.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Raw decoded image bytes.
    pub bytes: Vec<u8>,
    /// Image type token from the data-URI prefix (`png`, `jpeg` or `jpg`).
    /// Doubles as the storage file extension.
    pub image_type: String,
    /// The base64 payload segment as received, for forwarding to the
    /// extraction service without re-encoding.
    pub base64_payload: String,
    /// Identifier assigned to this reading. The storage filename is derived
    /// from it so the artifact and the row share one handle.
    pub measure_uuid: Uuid,
    /// Assigned storage name: `{measure_uuid}.{image_type}`.
    pub filename: String,
}

impl DecodedImage {
    /// MIME type string for the extraction service (`image/png` etc.).
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.image_type)
    }
}

/// Why an uploaded image string was rejected.
///
/// The three conditions are distinct on purpose; callers and tests rely on
/// telling them apart.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The string does not start with a supported `data:image/...;base64,`
    /// prefix (wrong MIME type, wrong casing, or not a data URI at all).
    #[error("Invalid image (not base64 or unsupported type)")]
    UnsupportedType,

    /// The prefix is well-formed but nothing follows the delimiter.
    #[error("Malformed base64 image payload")]
    EmptyPayload,

    /// The payload segment is not decodable base64.
    #[error("The base64 string could not be decoded")]
    UndecodablePayload,
}

/// Validate and decode a data-URI image string.
pub fn decode_data_uri(image: &str) -> Result<DecodedImage, ImageError> {
    let captures = DATA_URI_PREFIX
        .captures(image)
        .ok_or(ImageError::UnsupportedType)?;

    let prefix_len = captures.get(0).expect("whole match").end();
    let image_type = captures.get(1).expect("type group").as_str().to_string();

    let payload = &image[prefix_len..];
    if payload.is_empty() {
        return Err(ImageError::EmptyPayload);
    }

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| ImageError::UndecodablePayload)?;

    let measure_uuid = Uuid::new_v4();
    let filename = format!("{measure_uuid}.{image_type}");

    Ok(DecodedImage {
        bytes,
        image_type,
        base64_payload: payload.to_string(),
        measure_uuid,
        filename,
    })
}
