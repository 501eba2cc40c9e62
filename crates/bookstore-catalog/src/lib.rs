//! # bookstore-catalog: Catalog Collaborator
//!
//! Everything the basket needs from outside the process: the book listing,
//! the commercial offers for a set of books, and the configuration that says
//! where to find them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bookstore-catalog                                │
//! │                                                                         │
//! │  ┌──────────────┐   ┌─────────────────┐   ┌──────────────────────────┐ │
//! │  │   config     │   │     source      │   │       protocol           │ │
//! │  │              │   │                 │   │                          │ │
//! │  │ CatalogConfig│──►│ trait           │◄──│ BookDto / OfferDto       │ │
//! │  │ (TOML + env) │   │ OfferSource     │   │ → Book / Offer           │ │
//! │  └──────────────┘   └────────┬────────┘   └──────────────────────────┘ │
//! │                              │                                          │
//! │                 ┌────────────┴────────────┐                             │
//! │                 ▼                         ▼                             │
//! │        ┌─────────────────┐       ┌─────────────────┐                    │
//! │        │   HttpCatalog   │       │  StaticCatalog  │                    │
//! │        │   (reqwest)     │       │  (in-memory)    │                    │
//! │        └─────────────────┘       └─────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use bookstore_catalog::{CatalogConfig, HttpCatalog, OfferSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::load_or_default(None);
//! let catalog = HttpCatalog::from_config(&config)?;
//!
//! let books = catalog.books().await?;
//! let offers = catalog.commercial_offers(&books[..2]).await?;
//! println!("{:?}", offers);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod protocol;
pub mod source;
pub mod static_catalog;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use http::HttpCatalog;
pub use source::OfferSource;
pub use static_catalog::StaticCatalog;
