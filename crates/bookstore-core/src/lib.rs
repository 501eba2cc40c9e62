//! # bookstore-core: Pure Business Logic for the Bookstore Basket
//!
//! This crate holds the basket and pricing rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront front-end (external)                 │   │
//! │  │        Book grid ──► Add / Remove ──► Basket view + total       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           bookstore-basket (BasketStore, PricingEngine)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bookstore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  basket   │  │  pricing  │  │   │
//! │  │   │   Book    │  │   Money   │  │  Basket   │  │  offers   │  │   │
//! │  │   │   Offer   │  │ Percentage│  │ LineItem  │  │  quotes   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, Offer, CommercialOffers)
//! - [`money`] - Money and Percentage with integer arithmetic
//! - [`basket`] - Basket aggregate and its line items
//! - [`pricing`] - Offer evaluation and best-offer selection
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation for books
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::{Basket, Book, CommercialOffers, Money, Offer, Percentage};
//! use bookstore_core::pricing::best_quote;
//!
//! let book = Book::new("c8fabf68", "Henri Potier à l'école des sorciers", Money::from_units(35));
//!
//! let mut basket = Basket::new();
//! basket.add_book(&book);
//! basket.add_book(&book);
//!
//! let offers = CommercialOffers::new(vec![
//!     Offer::Percentage { value: Percentage::from_percent(4) },
//!     Offer::Minus { value: Money::from_units(15) },
//! ]);
//!
//! let quote = best_quote(basket.subtotal(), Some(&offers));
//! assert_eq!(quote.total, Money::from_units(55));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketLineItem};
pub use error::{PricingError, ValidationError};
pub use money::{Money, Percentage};
pub use pricing::PriceQuote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an ISBN as accepted from the catalog.
///
/// ISBN-13 with hyphens is 17 characters; the catalog also uses 36-character
/// UUIDs as identifiers. Anything past this bound is rejected at the boundary.
pub const MAX_ISBN_LENGTH: usize = 64;

/// Highest unit price accepted from the catalog, in cents (1,000,000.00).
///
/// At this price a single line cannot overflow `i64` cents for any `u32`
/// quantity.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Maximum length of a book title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Separator used when several ISBNs are joined into one lookup key.
pub const ISBN_KEY_SEPARATOR: char = ',';
