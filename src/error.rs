//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! various error conditions, from database issues to validation failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application
//! errors into HTTP responses with `{"error": "..."}` JSON bodies. It also provides
//! `From` trait implementations for `sqlx::Error` and `validator::ValidationErrors`,
//! allowing handlers to propagate failures with the `?` operator, plus the
//! extractor error handlers wired into `web::JsonConfig`/`web::PathConfig` so
//! that malformed bodies and paths keep the same `{"error"}` shape.

use actix_web::error::{JsonPayloadError, PathError, ResponseError};
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, often carrying a message
/// detailing the issue. These errors are then converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Represents an unauthorized access attempt (HTTP 401).
    /// Used when a token is missing, malformed, expired, or carries a bad signature.
    Unauthorized(String),
    /// Represents a client-side error due to a malformed or invalid request (HTTP 400).
    /// Also covers duplicate usernames and failed login attempts.
    BadRequest(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    /// Deliberately also covers resources owned by a different user, so that a
    /// non-owner cannot distinguish "does not exist" from "not yours".
    NotFound(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// The wrapped detail is logged but never sent to the client.
    DatabaseError(String),
    /// Represents an error due to failed input validation (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            // Database detail stays in the server log; the client sees a generic body.
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; everything else
/// becomes `AppError::DatabaseError`. Unique-constraint violations that need a
/// client-facing message (duplicate username) are translated at the call site
/// before this impl applies.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Error handler for the `web::Json` extractor.
///
/// A body that is not valid JSON, or that fails serde deserialization (wrong
/// type, missing field), is rejected before any handler runs; without this
/// hook actix answers with a plain-text 400. Registered via
/// `web::JsonConfig::default().error_handler(..)` on the app so the response
/// keeps the `{"error": string}` contract.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// Error handler for the `web::Path` extractor.
///
/// Covers task ids that are not valid UUIDs; registered via
/// `web::PathConfig::default().error_handler(..)` so the 400 carries the same
/// `{"error": string}` body as every other failure.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
