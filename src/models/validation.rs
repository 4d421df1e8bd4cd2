//! Validation error types

use std::fmt;

/// Validation error for product fields.
///
/// Display output is the user-visible message, surfaced verbatim in the
/// HTTP error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field empty or over its length cap
    Length { field: &'static str, max: usize },

    /// Optional text field over its length cap
    TooLong { field: &'static str, max: usize },

    /// Numeric field missing or not strictly positive
    NonPositive { field: &'static str },

    /// Required field absent from the payload
    Missing { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { field, max } => write!(
                f,
                "Product {} cannot be empty or exceed {} characters.",
                field, max
            ),
            Self::TooLong { field, max } => {
                write!(f, "Product {} cannot exceed {} characters.", field, max)
            }
            Self::NonPositive { field } => {
                write!(f, "Product {} must be greater than 0.", field)
            }
            Self::Missing { field } => write!(f, "Product {} must be informed.", field),
        }
    }
}

impl std::error::Error for ValidationError {}
