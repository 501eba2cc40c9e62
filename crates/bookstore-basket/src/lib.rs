//! # bookstore-basket: Live Basket & Pricing
//!
//! The observable basket and the engine that keeps its price current.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Front-end ──add/remove──► BasketStore ──BasketState{rev}──┐           │
//! │       ▲                          │                          │           │
//! │       │                          │ basket_items()           ▼           │
//! │       │                          │ total_items()     PricingEngine      │
//! │       │◄─────────────────────────┘ quantity_of()            │           │
//! │       │                                                     │ lookup    │
//! │       │                                                     ▼           │
//! │       │                                              dyn OfferSource    │
//! │       │                                                     │           │
//! │       └────────── total_price() ◄── BasketTotal{rev} ◄──────┘           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookstore_basket::{BasketStore, PricingEngine};
//! use bookstore_catalog::{CatalogConfig, HttpCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(HttpCatalog::from_config(&CatalogConfig::default())?);
//! let books = catalog.books().await?;
//!
//! let store = BasketStore::new();
//! let pricing = PricingEngine::new(&store, catalog).start();
//!
//! store.add_book(&books[0]);
//! let total = pricing.quote_for(store.revision()).await?;
//! println!("{} to pay", total.total());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod state;
pub mod store;

pub use engine::{quote_basket, PricingEngine, PricingHandle};
pub use error::{BasketError, BasketResult};
pub use state::{BasketState, BasketTotal};
pub use store::BasketStore;
