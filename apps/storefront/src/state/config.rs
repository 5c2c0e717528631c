//! # Configuration State
//!
//! Display and storage settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! The catalog server address lives in `CatalogConfig` (storefront-catalog).
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::Money;

use crate::error::{ApiError, ApiResult};

/// Environment variable overriding the database file location.
pub const ENV_DB_PATH: &str = "STOREFRONT_DB_PATH";

/// Environment variable overriding the store name.
pub const ENV_STORE_NAME: &str = "STOREFRONT_STORE_NAME";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in the product list header)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Explicit database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Storefront"
    /// - Currency: Rs, 2 decimals
    /// - Database: platform data directory
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_symbol: "Rs".to_string(),
            currency_decimals: 2,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_DB_PATH`: database file
    /// - `STOREFRONT_STORE_NAME`: store name
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup(ENV_STORE_NAME) {
            config.store_name = name;
        }

        config
    }

    /// Resolves the database file location.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
    /// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
    /// - **Linux**: `~/.local/share/storefront/storefront.db`
    ///
    /// The data directory is created if missing.
    pub fn resolve_database_path(&self) -> ApiResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "storefront", "storefront")
            .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|e| {
            ApiError::internal(format!("Could not create {}: {}", data_dir.display(), e))
        })?;

        Ok(data_dir.join("storefront.db"))
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123_456)), "Rs 1234.56");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();

        // Money is held in cents; rescale for other decimal settings,
        // rounding half away from zero when dropping digits.
        let number = match self.currency_decimals {
            0 => (cents.saturating_add(50) / 100).to_string(),
            1 => {
                let tenths = cents.saturating_add(5) / 10;
                format!("{}.{}", tenths / 10, tenths % 10)
            }
            d => format!(
                "{}.{:02}{}",
                cents / 100,
                cents % 100,
                "0".repeat(usize::from(d) - 2)
            ),
        };

        format!("{}{} {}", sign, self.currency_symbol, number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(99_900)), "Rs 999.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "Rs 0.01");
        assert_eq!(config.format_currency(Money::zero()), "Rs 0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1_234)), "-Rs 12.34");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = ConfigState::default();
        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1_250)), "Rs 13");
        assert_eq!(config.format_currency(Money::from_cents(1_249)), "Rs 12");

        config.currency_decimals = 1;
        assert_eq!(config.format_currency(Money::from_cents(1_249)), "Rs 12.5");
        assert_eq!(config.format_currency(Money::from_cents(1_244)), "Rs 12.4");
        assert_eq!(config.format_currency(Money::from_cents(1_299)), "Rs 13.0");
        assert_eq!(config.format_currency(Money::from_cents(-1_249)), "-Rs 12.5");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(1_250)), "Rs 12.500");
    }

    #[test]
    fn test_from_lookup() {
        let config = ConfigState::from_lookup(|name| match name {
            ENV_DB_PATH => Some("/tmp/shop.db".to_string()),
            ENV_STORE_NAME => Some("Corner Shop".to_string()),
            _ => None,
        });
        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/shop.db")
        );
    }
}
