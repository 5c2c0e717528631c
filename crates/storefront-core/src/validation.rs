//! # Validation Module
//!
//! Input validation for the sign-in and add-product forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form / CLI input                                             │
//! │  └── THIS MODULE: field rules, every failing field reported            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CatalogClient::add_product                                   │
//! │  └── Re-runs validate_new_product before anything hits the network     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog server (external)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_email, validate_login_form};
//!
//! assert!(validate_email("test@test.com").is_ok());
//! assert!(validate_login_form("test@test.com", "").is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, ValidationErrors};
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum product name length (after trimming).
pub const MIN_PRODUCT_NAME_LEN: usize = 3;

/// Maximum product name length.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Minimum product description length (after trimming).
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Maximum search query length.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static HTTP_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("url pattern compiles"));

// =============================================================================
// Sign-in Form
// =============================================================================

/// Validates an email address shape (`local@domain.tld`, no whitespace).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "please enter a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates the sign-in form before credentials are checked.
///
/// ## Rules
/// - Both fields must be filled in
/// - Email must look like an email address
///
/// Passing this check says nothing about whether the credentials are right.
pub fn validate_login_form(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_email(email));

    if password.is_empty() {
        errors.push(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    errors.into_result()
}

// =============================================================================
// Add-Product Form
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At least 3 and at most 200 characters after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    let len = name.chars().count();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if len < MIN_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_PRODUCT_NAME_LEN,
        });
    }

    if len > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product description (required, at least 10 characters).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description".to_string(),
            min: MIN_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates the price of a new product. Free products are not accepted.
pub fn validate_new_price(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an image URL: required, and must start with `http://` or `https://`.
pub fn validate_image_url(image: &str) -> ValidationResult<()> {
    let image = image.trim();

    if image.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    if !HTTP_URL_RE.is_match(image) {
        return Err(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole add-product form, reporting every failing field.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_new_product;
/// use storefront_core::{Money, NewProduct};
///
/// let draft = NewProduct::trimmed("TV", Money::zero(), "short", "ftp://x");
/// let errors = validate_new_product(&draft).unwrap_err();
/// assert_eq!(errors.errors().len(), 4);
/// ```
pub fn validate_new_product(product: &NewProduct) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_product_name(&product.name));
    errors.check(validate_new_price(product.price.cents()));
    errors.check(validate_description(&product.description));
    errors.check(validate_image_url(&product.image));

    errors.into_result()
}

// =============================================================================
// Search
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns the whole catalog)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@test.com").is_ok());
        assert!(validate_email("  a.b@shop.co.in ").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("test@test").is_err());
        assert!(validate_email("test test@test.com").is_err());
        assert!(validate_email("@test.com").is_err());
    }

    #[test]
    fn test_validate_login_form() {
        assert!(validate_login_form("test@test.com", "123456").is_ok());

        let errors = validate_login_form("", "").unwrap_err();
        assert!(errors.for_field("email").is_some());
        assert!(errors.for_field("password").is_some());

        let errors = validate_login_form("nope", "123456").unwrap_err();
        assert_eq!(errors.errors().len(), 1);
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("iPad").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(matches!(
            validate_product_name(" TV "),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Noise-cancelling headphones").is_ok());
        assert!(validate_description("   ").is_err());
        assert!(validate_description("too short").is_err());
    }

    #[test]
    fn test_validate_new_price() {
        assert!(validate_new_price(1).is_ok());
        assert!(validate_new_price(0).is_err());
        assert!(validate_new_price(-100).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://images.example.com/a.jpg").is_ok());
        assert!(validate_image_url("http://localhost/a.png").is_ok());
        assert!(validate_image_url("").is_err());
        assert!(validate_image_url("ftp://example.com/a.jpg").is_err());
        assert!(validate_image_url("https://").is_err());
    }

    #[test]
    fn test_validate_new_product_ok() {
        let draft = NewProduct::trimmed(
            "Kindle Paperwhite",
            Money::from_cents(13_999),
            "Waterproof e-reader with adjustable warm light",
            "https://example.com/kindle.jpg",
        );
        assert!(validate_new_product(&draft).is_ok());
    }

    #[test]
    fn test_validate_new_product_reports_each_field() {
        let draft = NewProduct::trimmed("Kindle", Money::zero(), "short", "https://x/y");
        let errors = validate_new_product(&draft).unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert!(errors.for_field("price").is_some());
        assert!(errors.for_field("description").is_some());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  phone ").unwrap(), "phone");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
