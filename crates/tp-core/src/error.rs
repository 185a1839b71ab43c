//! # AppError
//!
//! Centralized error handling for trailpost. Every failure a handler can
//! produce is one of these variants; the API layer maps each variant to a
//! fixed HTTP status and envelope shape.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Structured per-field validation detail, serialized into the `errors`
/// member of the error envelope as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finishes a validation pass: `Ok(())` when nothing was recorded,
    /// otherwise the collected detail wrapped in `AppError::Validation`.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

/// The primary error type for all tp-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., User, Post, star, rating)
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, i64),

    /// Input failed validation; carries per-field detail
    #[error("validation error")]
    Validation(ValidationErrors),

    /// The request could not be authenticated
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to act on this resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists (e.g., duplicate star, taken username)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for trailpost logic.
pub type Result<T> = std::result::Result<T, AppError>;
