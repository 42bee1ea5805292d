//! Error taxonomy for the intake pipeline and the post store.

use serde::Serialize;
use thiserror::Error;

/// The request body could not be coerced into structured data at all.
///
/// Terminal for the request: the client must resend well-formed input.
/// Distinct from [`ValidationError`], which means the data parsed but
/// violates the post shape.
#[derive(Debug, Clone, Error)]
#[error("body could not be read as structured data: {reason}")]
pub struct RepairError {
    pub reason: String,
}

/// Constraint violated by a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldReason {
    /// Required field absent from the payload.
    Missing,
    /// Present but not the expected JSON type.
    WrongType { expected: &'static str },
    /// Present, a string, but empty.
    Empty,
}

/// One offending field and the constraint it violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: FieldReason,
}

impl FieldError {
    pub fn message(&self) -> String {
        match &self.reason {
            FieldReason::Missing => format!("{} is required", self.field),
            FieldReason::WrongType { expected } => {
                format!("{} must be {}", self.field, expected)
            }
            FieldReason::Empty => format!("{} must not be empty", self.field),
        }
    }
}

/// Structured data was present but violates the post shape.
#[derive(Debug, Clone, Error)]
#[error("payload failed validation on {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// The store is unreachable or rejected the operation.
///
/// Not-found is deliberately absent here: addressing a missing record is a
/// normal outcome and store operations report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("store operation failed: {0}")]
    Query(String),
}

/// Sum of everything the write path can report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Repair(#[from] RepairError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
