//! # Offer Source
//!
//! The one seam between pricing and the outside world.
//!
//! ```text
//! ┌──────────────────┐   books in basket    ┌──────────────────────────┐
//! │  PricingEngine   │ ───────────────────► │  dyn OfferSource         │
//! │ (bookstore-      │                      │                          │
//! │  basket)         │ ◄─────────────────── │  HttpCatalog   (reqwest) │
//! └──────────────────┘  Option<Commercial   │  StaticCatalog (memory)  │
//!                              Offers>      └──────────────────────────┘
//! ```

use async_trait::async_trait;
use bookstore_core::{Book, CommercialOffers};

use crate::error::CatalogResult;

/// Looks up the commercial offers for a set of books.
///
/// ## Contract
/// - Empty `books` → `Ok(None)` without doing any I/O
/// - The lookup key is the ISBNs joined with `,` in the order given
/// - "No offers for this set" (e.g. HTTP 404) → `Ok(None)`
/// - Transport or payload failures → `Err`; callers decide how to degrade
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetches the offers for exactly this set of books.
    async fn commercial_offers(&self, books: &[Book]) -> CatalogResult<Option<CommercialOffers>>;

    /// Name used in log fields.
    fn source_name(&self) -> &'static str;
}

/// Joins ISBNs into the lookup key used on the wire and by the static catalog.
pub fn lookup_key(books: &[Book]) -> String {
    let separator = bookstore_core::ISBN_KEY_SEPARATOR.to_string();
    books
        .iter()
        .map(|b| b.isbn.as_str())
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::{Basket, Money};

    #[test]
    fn test_lookup_key_matches_basket_key() {
        let a = Book::new("a", "A", Money::from_units(1));
        let b = Book::new("b", "B", Money::from_units(2));

        let mut basket = Basket::new();
        basket.add_book(&b);
        basket.add_book(&a);
        basket.add_book(&b);

        assert_eq!(lookup_key(&basket.books()), basket.lookup_key());
        assert_eq!(lookup_key(&basket.books()), "b,a");
        assert_eq!(lookup_key(&[]), "");
    }
}
