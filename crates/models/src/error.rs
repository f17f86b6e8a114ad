use thiserror::Error;

/// Input rejected before any storage access
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("Invalid term for {field}: {value:?} (expected Spring, Summer or Fall)")]
    InvalidTerm { field: &'static str, value: String },

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
