//! Client for the Gemini vision-language extraction service.

pub mod client;

pub use client::{ExtractorError, GeminiClient, ValueExtractor};
