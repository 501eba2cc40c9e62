//! # Catalog Error Types
//!
//! Error types for catalog lookups and configuration.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http (status)  │  │  DeserializationFailed  │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  InvalidBook            │ │
//! │  │  ConfigLoad/Save│  │  Connection     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine never shows these to the basket display: a failed
//! offer lookup is logged and priced as "no offers".

use bookstore_core::ValidationError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Invalid base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Could not reach the catalog.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// Response body did not match the expected shape.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The catalog returned a book that fails validation.
    #[error("Invalid book from catalog: {0}")]
    InvalidBook(#[from] ValidationError),

    /// Simulated failure from the in-memory catalog.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// True for failures where retrying later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Timeout(_)
            | CatalogError::ConnectionFailed(_)
            | CatalogError::Unavailable(_) => true,
            CatalogError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(e.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(e: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(e.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(e: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(e.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(e: url::ParseError) -> Self {
        CatalogError::InvalidUrl(e.to_string())
    }
}
