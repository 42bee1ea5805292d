//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use quillpress_core::error::{FieldError, PipelineError, StoreError};
use quillpress_shared::{ErrorResponse, InvalidParam};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// The body could not be coerced into structured data at all.
    Unreadable(String),
    /// Structured data was present but violates the post shape.
    Validation(Vec<FieldError>),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unreadable(msg) => write!(f, "Unreadable body: {}", msg),
            AppError::Validation(errors) => {
                write!(f, "Validation failed on {} field(s)", errors.len())
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unreadable(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Unreadable(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => {
                let params = errors
                    .iter()
                    .map(|e| InvalidParam {
                        name: e.field.clone(),
                        reason: e.message(),
                    })
                    .collect();
                ErrorResponse::unprocessable("one or more fields are invalid")
                    .with_invalid_params(params)
            }
            AppError::Internal(detail) => {
                // Log internal errors; the response body stays opaque
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from pipeline errors
impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Repair(repair) => AppError::Unreadable(repair.to_string()),
            PipelineError::Validation(validation) => AppError::Validation(validation.errors),
            PipelineError::Store(store) => store.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection(msg) => {
                tracing::error!("Store connection error: {}", msg);
                AppError::Internal("storage unavailable".to_string())
            }
            StoreError::Query(msg) => {
                tracing::error!("Store query error: {}", msg);
                AppError::Internal("storage error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
