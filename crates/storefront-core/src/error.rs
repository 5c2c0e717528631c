//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError         - General domain errors                          │
//! │  ├── ValidationError   - One failed form field                          │
//! │  └── ValidationErrors  - Every failed field of one form                 │
//! │                                                                         │
//! │  storefront-db errors        └── DbError       (recovered locally)      │
//! │  storefront-catalog errors   └── CatalogError  (propagated to caller)   │
//! │  app errors                  └── ApiError      (what the CLI prints)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not part of the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A single field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A whole form failed validation.
    #[error("Invalid form: {0}")]
    InvalidForm(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the field so a form can show the message next to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, non-http URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// All field errors collected from one form submission.
///
/// Forms report every bad field at once rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    /// Records a field error.
    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    /// Records the error of a field check, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.push(err);
        }
    }

    /// Returns true when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the collected errors in field order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the error for a given field, if that field failed.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// Converts the collected set into a `Result`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "description".to_string(),
            min: 10,
        };
        assert_eq!(err.to_string(), "description must be at least 10 characters");
    }

    #[test]
    fn test_validation_errors_collects_and_joins() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.check(Ok(()));
        errors.check(Err(ValidationError::Required {
            field: "name".to_string(),
        }));
        errors.push(ValidationError::MustBePositive {
            field: "price".to_string(),
        });

        assert_eq!(errors.errors().len(), 2);
        assert!(errors.for_field("price").is_some());
        assert!(errors.for_field("image").is_none());
        assert_eq!(
            errors.to_string(),
            "name is required; price must be greater than 0"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
