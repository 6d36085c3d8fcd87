//! Request-body extractor with the project's error body on rejection.
//!
//! A bare `axum::Json` rejection produces a plain-text response; wrapping it
//! routes malformed or type-mismatched bodies through [`AppError`] so every
//! failure, including transport-level ones, carries the uniform
//! `{error_code, error_description}` shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections converted to 400 `INVALID_DATA`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
