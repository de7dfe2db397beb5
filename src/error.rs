//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every domain failure is a typed value carrying a status code, a human-readable
//! message, and (for the not-found kinds) the offending id as structured context.
//!
//! `AppError` implements `actix_web::error::ResponseError`, which is the single
//! global translation point from a typed error to the wire envelope
//! `{success: false, data, message}`. It also provides `From` implementations for
//! `sqlx::Error`, `validator::ValidationErrors`, `jsonwebtoken::errors::Error`,
//! and `bcrypt::BcryptError`, so handlers can propagate with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::{json, Value};
use std::fmt;
use uuid::Uuid;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Constructing a variant is a pure data step; no I/O happens here.
#[derive(Debug)]
pub enum AppError {
    /// The requested todo does not exist for the calling user (HTTP 404).
    /// An ownership mismatch is deliberately indistinguishable from a missing row.
    TodoNotFound(Option<Uuid>),
    /// The requested user account does not exist (HTTP 404).
    UserNotFound(Option<Uuid>),
    /// A todo could not be persisted; wraps the underlying cause (HTTP 500).
    TodoCreationFailed(String),
    /// New password and its confirmation differ (HTTP 400).
    PasswordMismatch,
    /// The supplied current password is wrong (HTTP 401).
    InvalidPassword,
    /// Token or credential validation failed (HTTP 401).
    AuthenticationFailed(String),
    /// Input validation failed (HTTP 422). Wraps `validator` output.
    ValidationFailed(String),
    /// Malformed or conflicting client request, e.g. duplicate email (HTTP 400).
    BadRequest(String),
    /// Unexpected server-side failure outside the persistence layer (HTTP 500).
    InternalServerError(String),
    /// Unexpected persistence-layer failure (HTTP 500). Wraps `sqlx` errors.
    DatabaseError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::TodoNotFound(_) | AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::TodoCreationFailed(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PasswordMismatch | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPassword | AppError::AuthenticationFailed(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Structured context echoed back in the envelope's `data` field.
    /// Only the not-found kinds carry any; everything else reports `null`.
    pub fn context(&self) -> Value {
        match self {
            AppError::TodoNotFound(Some(id)) => json!({ "todo_id": id }),
            AppError::UserNotFound(Some(id)) => json!({ "user_id": id }),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::TodoNotFound(None) => write!(f, "Todo not found"),
            AppError::TodoNotFound(Some(id)) => write!(f, "Todo with id {} not found", id),
            AppError::UserNotFound(None) => write!(f, "User not found"),
            AppError::UserNotFound(Some(id)) => write!(f, "User with id {} not found", id),
            AppError::TodoCreationFailed(cause) => write!(f, "Failed to create todo: {}", cause),
            AppError::PasswordMismatch => write!(f, "New passwords do not match"),
            AppError::InvalidPassword => write!(f, "Current password is incorrect"),
            AppError::AuthenticationFailed(msg) => write!(f, "{}", msg),
            AppError::ValidationFailed(msg) => write!(f, "{}", msg),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::InternalServerError(msg) => write!(f, "{}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into envelope-shaped `HttpResponse` objects.
///
/// Handlers return `Result<_, AppError>` and Actix routes every failure through
/// here, so success and error responses share the same three-field body shape.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(json!({
            "success": false,
            "data": self.context(),
            "message": self.to_string(),
        }))
    }
}

/// `sqlx::Error::RowNotFound` maps to a todo-level not-found; everything else
/// is surfaced as a database error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::TodoNotFound(None),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationFailed(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::AuthenticationFailed(format!("Could not validate user: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
