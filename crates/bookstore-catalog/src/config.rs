//! # Catalog Configuration
//!
//! Where the catalog lives and how long we wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKSTORE_API_URL=https://books.example/                           │
//! │     BOOKSTORE_API_TIMEOUT_SECS=5                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bookstore/catalog.toml (Linux)                           │
//! │     ~/Library/Application Support/com.bookstore.storefront/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Henri Potier public API, 10 second timeout                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [api]
//! base_url = "https://henri-potier.techx.fr/"
//! timeout_secs = 10
//!
//! [pricing]
//! refresh_on_start = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Public catalog used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://henri-potier.techx.fr/";

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "BOOKSTORE_API_URL";

/// Environment variable overriding `api.timeout_secs`.
pub const ENV_API_TIMEOUT: &str = "BOOKSTORE_API_TIMEOUT_SECS";

// =============================================================================
// API Settings
// =============================================================================

/// How to reach the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `books` and `books/{isbns}/commercialOffers` are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Pricing engine behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Price the initial (empty) basket as soon as the engine starts.
    ///
    /// When false the first quote appears after the first mutation.
    #[serde(default = "default_true")]
    pub refresh_on_start: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            refresh_on_start: true,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API endpoint settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Pricing engine settings.
    #[serde(default)]
    pub pricing: PricingSettings,
}

impl CatalogConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
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

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Catalog config saved");
        Ok(())
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

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.api.base_url = url;
        }

        if let Ok(timeout) = std::env::var(ENV_API_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(t) => self.api.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric catalog timeout"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bookstore", "storefront")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL, always ending in `/` so relative joins keep the path.
    pub fn base_url(&self) -> CatalogResult<Url> {
        let mut raw = self.api.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.pricing.refresh_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CatalogConfig::default();

        config.api.base_url = "ftp://books.example/".into();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));

        config.api.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));

        config.api.base_url = "http://localhost:8080".into();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let mut config = CatalogConfig::default();
        config.api.base_url = "http://localhost:8080/api".into();

        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
        assert_eq!(url.join("books").unwrap().as_str(), "http://localhost:8080/api/books");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [api]
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.pricing.refresh_on_start);
    }

    #[test]
    fn test_toml_serialization() {
        let config = CatalogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[pricing]"));

        let parsed: CatalogConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_then_load_from_explicit_path() {
        let path = std::env::temp_dir().join(format!("bookstore-catalog-{}.toml", std::process::id()));

        let mut config = CatalogConfig::default();
        config.api.base_url = "http://127.0.0.1:9000/".into();
        config.pricing.refresh_on_start = false;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: CatalogConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).ok();
    }
}
