//! # Catalog Configuration
//!
//! Where the catalog server lives and how long to wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_API_URL=http://10.0.2.2:3000                            │
//! │     STOREFRONT_API_TIMEOUT_SECS=5                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/catalog.toml (Linux)                          │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000, 10 second timeout                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [api]
//! base_url = "http://localhost:3000"
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "STOREFRONT_API_URL";

/// Environment variable overriding the request timeout.
pub const ENV_API_TIMEOUT_SECS: &str = "STOREFRONT_API_TIMEOUT_SECS";

// =============================================================================
// API Settings
// =============================================================================

/// Catalog server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme, host, port and optional path prefix of the catalog server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete catalog client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

impl CatalogConfig {
    /// Creates a configuration pointing at `base_url` with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        CatalogConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..ApiSettings::default()
            },
        }
    }

    /// Loads configuration: defaults, then file, then environment.
    ///
    /// A missing file is not an error. An unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        let url = Url::parse(&self.api.base_url)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(format!(
                "Catalog URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the environment in `load`).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_API_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric catalog timeout"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// URL of the products collection, `{base_url}/products`.
    ///
    /// A path prefix on the base URL is kept: `http://host/api` gives
    /// `http://host/api/products`.
    pub fn products_url(&self) -> CatalogResult<Url> {
        let mut base = Url::parse(&self.api.base_url)?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(base.join("products")?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
