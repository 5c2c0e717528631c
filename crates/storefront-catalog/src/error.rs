//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Request             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  InvalidProduct         │ │
//! │  │  InvalidUrl     │  │  Status         │  │  (form rules, checked   │ │
//! │  │  ConfigLoad     │  │  Decode         │  │   before sending)       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried. `get_products` failures are absorbed by
//! `fetch_or_fallback`; `add_product` failures reach the caller.

use storefront_core::ValidationErrors;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog client error.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog configuration.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Base URL does not parse or is not http/https.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request never got a response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Catalog server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON.
    #[error("Invalid response from catalog server: {0}")]
    Decode(String),

    // =========================================================================
    // Request Errors
    // =========================================================================
    /// New product failed form validation; nothing was sent.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ValidationErrors),
}

impl CatalogError {
    /// Returns true if the server was reached and refused the request.
    pub fn is_status(&self) -> bool {
        matches!(self, CatalogError::Status { .. })
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}
