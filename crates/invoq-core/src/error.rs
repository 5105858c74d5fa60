//! # Error Types
//!
//! Validation errors for invoq-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to an inline, user-facing message
//!
//! Domain outcomes that are not failures (duplicate submission, token
//! already used, token not found) are modeled as values in the
//! orchestration layer, not as error variants here: each caller decides
//! locally whether to block or warn.

use thiserror::Error;

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements; they are surfaced
/// inline and no store writes happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. tax id not 13 digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
