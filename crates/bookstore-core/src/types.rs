//! # Domain Types
//!
//! Catalog-side types used throughout the bookstore.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │      Book       │   │        Offer         │   │ CommercialOffers│  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  isbn           │   │  Percentage { value }│   │  offers: [..]   │  │
//! │  │  title          │   │  Minus { value }     │   │                 │  │
//! │  │  price (Money)  │   │  Slice { value,      │   │  keyed by the   │  │
//! │  │  cover?         │   │          slice }     │   │  basket's ISBNs │  │
//! │  │  synopsis       │   │  Unknown { kind }    │   │                 │  │
//! │  └─────────────────┘   └──────────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Books are immutable once fetched. Offers are ephemeral: they are fetched
//! for one pricing computation and dropped afterwards.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percentage};

// =============================================================================
// Book
// =============================================================================

/// A book from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Book {
    /// ISBN - the unique business identifier.
    pub isbn: String,

    /// Display title.
    pub title: String,

    /// Unit price (never negative).
    pub price: Money,

    /// Cover image URL, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    /// Synopsis paragraphs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synopsis: Vec<String>,
}

impl Book {
    /// Creates a book with no cover and no synopsis.
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, price: Money) -> Self {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            price,
            cover: None,
            synopsis: Vec::new(),
        }
    }
}

// =============================================================================
// Offer
// =============================================================================

/// A commercial discount rule.
///
/// Every variant computes a candidate total from the basket subtotal; see
/// [`crate::pricing::candidate_total`]. Offers never compound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Offer {
    /// `value` percent off the subtotal.
    Percentage { value: Percentage },

    /// A flat amount off the subtotal.
    Minus { value: Money },

    /// `value` off for every `slice_value` spent (rounded bracket count).
    Slice {
        value: Money,
        #[serde(rename = "sliceValue")]
        slice_value: Money,
    },

    /// An offer type this version does not understand. Priced as no discount.
    Unknown { kind: String },
}

impl Offer {
    /// Short name of the offer type, as used on the wire.
    pub fn kind(&self) -> &str {
        match self {
            Offer::Percentage { .. } => "percentage",
            Offer::Minus { .. } => "minus",
            Offer::Slice { .. } => "slice",
            Offer::Unknown { kind } => kind,
        }
    }
}

// =============================================================================
// Commercial Offers
// =============================================================================

/// The offers available for one specific set of ISBNs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommercialOffers {
    pub offers: Vec<Offer>,
}

impl CommercialOffers {
    /// Wraps a list of offers.
    pub fn new(offers: Vec<Offer>) -> Self {
        CommercialOffers { offers }
    }

    /// True when there is nothing to evaluate.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Number of offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new() {
        let book = Book::new("a460afed", "Henri Potier et la Chambre des secrets", Money::from_units(30));
        assert_eq!(book.isbn, "a460afed");
        assert_eq!(book.price.cents(), 3000);
        assert!(book.cover.is_none());
        assert!(book.synopsis.is_empty());
    }

    #[test]
    fn test_offer_kind() {
        assert_eq!(Offer::Percentage { value: Percentage::from_percent(5) }.kind(), "percentage");
        assert_eq!(Offer::Minus { value: Money::from_units(15) }.kind(), "minus");
        assert_eq!(
            Offer::Slice { value: Money::from_units(12), slice_value: Money::from_units(100) }.kind(),
            "slice"
        );
        assert_eq!(Offer::Unknown { kind: "bogo".into() }.kind(), "bogo");
    }

    #[test]
    fn test_offer_json_shape() {
        let offer = Offer::Slice {
            value: Money::from_units(12),
            slice_value: Money::from_units(100),
        };
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["type"], "slice");
        assert_eq!(json["value"], 1200);
        assert_eq!(json["sliceValue"], 10000);
    }

    #[test]
    fn test_commercial_offers_helpers() {
        let offers = CommercialOffers::default();
        assert!(offers.is_empty());

        let offers = CommercialOffers::new(vec![Offer::Minus { value: Money::from_units(1) }]);
        assert_eq!(offers.len(), 1);
        assert!(!offers.is_empty());
    }
}
