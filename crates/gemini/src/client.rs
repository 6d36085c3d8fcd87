//! REST client for the Gemini `generateContent` endpoint.
//!
//! Sends the uploaded meter photograph inline (base64 + MIME type) together
//! with a fixed instruction asking for only the numeric reading, and returns
//! the service's free text. Parsing a number out of that text is the
//! caller's problem; the service's reply is untrusted by contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Instruction sent alongside every image. The service is asked for a bare
/// number; the response is still parsed defensively downstream.
const EXTRACTION_PROMPT: &str = "Extract only the numeric value of the meter reading \
from this image. Respond with only the number, no extra text.";

/// Default model, matching the deployed configuration.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Seam between the ingestion workflow and the extraction service.
///
/// The API layer holds a `dyn ValueExtractor` so tests can substitute a
/// scripted stub for the real network client.
#[async_trait]
pub trait ValueExtractor: Send + Sync {
    /// Submit one image and return the service's raw text response.
    async fn extract_reading(
        &self,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String, ExtractorError>;
}

/// Errors from the extraction service layer.
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Extraction service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// * `api_url` - base URL, e.g. `https://generativelanguage.googleapis.com`.
    /// * `api_key` - API key passed as the `key` query parameter.
    /// * `model`   - model identifier, e.g. `gemini-2.0-flash-001`.
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ValueExtractor for GeminiClient {
    async fn extract_reading(
        &self,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String, ExtractorError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_data.trim().to_string(),
                        },
                    },
                    Part::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                ],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_url, self.model, self.api_key
        );

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.first_text();
        tracing::debug!(model = %self.model, response = %text, "Extraction response received");
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// Subset of the `generateContent` response we read.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, or the empty string
    /// when the response carries none (the downstream parser then fails the
    /// request as unparseable).
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .unwrap_or_default()
    }
}
