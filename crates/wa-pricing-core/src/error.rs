//! Unified error handling for WA Pricing
//!
//! This module provides a single error type covering validation, lookup,
//! backend and internal failures, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Fallback message shown when the backend fails without explaining why
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unsupported country: {0}")]
    UnknownCountry(String),

    #[error("Duplicate country code: {0}")]
    DuplicateCountry(String),

    #[error("Currency change from {from} to {to} must be acknowledged before saving")]
    CurrencyChangeUnconfirmed { from: String, to: String },

    // ==================== Lookup Errors ====================
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ==================== Backend Errors ====================
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Backend { status: u16, message: String },

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::MissingField(_)
            | AppError::UnknownCountry(_)
            | AppError::DuplicateCountry(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::CompanyNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::CurrencyChangeUnconfirmed { .. } => StatusCode::CONFLICT,

            // 502 Bad Gateway
            AppError::Network(_) => StatusCode::BAD_GATEWAY,

            AppError::Backend { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::MissingField(_) => "missing_field",
            AppError::UnknownCountry(_) => "unknown_country",
            AppError::DuplicateCountry(_) => "duplicate_country",
            AppError::CurrencyChangeUnconfirmed { .. } => "currency_change_unconfirmed",
            AppError::CompanyNotFound(_) => "company_not_found",
            AppError::NotFound(_) => "not_found",
            AppError::Network(_) => "network_error",
            AppError::Backend { .. } => "backend_error",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// Whether the error was raised locally, before any network call
    pub fn is_validation(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
            || matches!(self, AppError::CurrencyChangeUnconfirmed { .. })
    }

    /// Message suitable for a user-facing notification
    ///
    /// Backend failures carry the server-provided message when there was one.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Backend { .. } | AppError::Network(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "success": false,
            "error": self.to_string(),
            "code": self.error_code(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
