//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                 │
//! │       │                                                                 │
//! │       ├── ValidationErrors (form) ────────► VALIDATION_ERROR           │
//! │       ├── CoreError::ProductNotFound ─────► NOT_FOUND                  │
//! │       ├── CatalogError (network/status) ──► CATALOG_ERROR              │
//! │       ├── login returned false ───────────► INVALID_CREDENTIALS        │
//! │       ├── no signed-in user ──────────────► AUTH_REQUIRED              │
//! │       └── DbError (startup only) ─────────► DATABASE_ERROR             │
//! │                                                                         │
//! │  Persistence errors after startup never get here: the session and     │
//! │  cart managers log them and carry on with in-memory state.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the CLI prints the error as:
//! ```json
//! { "code": "NOT_FOUND", "message": "Product not found: 42" }
//! ```

use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::{CoreError, ValidationError, ValidationErrors};
use storefront_db::DbError;
use thiserror::Error;

/// API error returned from commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Local database could not be opened
    DatabaseError,

    /// Catalog server unreachable or refused the request
    CatalogError,

    /// Email/password did not match
    InvalidCredentials,

    /// Command needs a signed-in user
    AuthRequired,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates an authentication-required error.
    pub fn auth_required() -> Self {
        ApiError::new(ErrorCode::AuthRequired, "Please sign in first")
    }

    /// Creates an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database error: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::InvalidForm(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidProduct(e) => ApiError::validation(e.to_string()),
            CatalogError::InvalidConfig(_)
            | CatalogError::InvalidUrl(_)
            | CatalogError::ConfigLoadFailed(_) => ApiError::internal(err.to_string()),
            other => {
                tracing::warn!(error = %other, "Catalog request failed");
                ApiError::new(ErrorCode::CatalogError, other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Auth Error
// =============================================================================

/// Failure of a credential backend (not a wrong password).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend could not be reached or answered nonsense.
    #[error("Credential backend unavailable: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_code_and_message() {
        let err = ApiError::not_found("Product", 42);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }

    #[test]
    fn test_catalog_error_mapping() {
        let status = CatalogError::Status {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(ApiError::from(status).code, ErrorCode::CatalogError);

        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
        let invalid = CatalogError::InvalidProduct(errors);
        let api = ApiError::from(invalid);
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(api.message.contains("price must be greater than 0"));
    }

    #[test]
    fn test_db_error_hides_details() {
        let api = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert!(!api.message.contains("disk"));
    }
}
