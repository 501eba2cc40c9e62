//! # Catalog Wire Protocol
//!
//! JSON shapes returned by the catalog API and their conversion into
//! domain types.
//!
//! ## Payloads
//! ```text
//! GET /books
//! [
//!   { "isbn": "c8fabf68-...", "title": "Henri Potier à l'école des sorciers",
//!     "price": 35, "cover": "https://...", "synopsis": ["...", "..."] }
//! ]
//!
//! GET /books/{isbn,isbn}/commercialOffers
//! { "offers": [
//!     { "type": "percentage", "value": 5 },
//!     { "type": "minus",      "value": 15 },
//!     { "type": "slice",      "value": 12, "sliceValue": 100 }
//! ] }
//! ```
//!
//! Numbers on the wire are JSON floats in major currency units (euros,
//! percent). They become integer cents and basis points here, rounded to
//! the nearest unit, so nothing downstream ever touches a float.

use bookstore_core::validation::validate_book;
use bookstore_core::{Book, CommercialOffers, Money, Offer, Percentage};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;

/// Offer type names used on the wire.
pub const OFFER_PERCENTAGE: &str = "percentage";
pub const OFFER_MINUS: &str = "minus";
pub const OFFER_SLICE: &str = "slice";

// =============================================================================
// Wire DTOs
// =============================================================================

/// A book as listed by `GET /books`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub synopsis: Vec<String>,
}

/// One entry of the `offers` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDto {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub value: f64,

    #[serde(rename = "sliceValue", default, skip_serializing_if = "Option::is_none")]
    pub slice_value: Option<f64>,
}

/// Body of `GET /books/{isbns}/commercialOffers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffersResponse {
    #[serde(default)]
    pub offers: Vec<OfferDto>,
}

// =============================================================================
// Conversions
// =============================================================================

/// Major units (e.g. `12.5` euros) to integer cents, nearest cent.
///
/// Non-finite input maps to zero; saturates at the i64 range.
pub fn units_to_cents(units: f64) -> i64 {
    if !units.is_finite() {
        return 0;
    }
    (units * 100.0).round() as i64
}

impl TryFrom<BookDto> for Book {
    type Error = CatalogError;

    fn try_from(dto: BookDto) -> Result<Self, Self::Error> {
        let book = Book {
            isbn: dto.isbn,
            title: dto.title,
            price: Money::from_cents(units_to_cents(dto.price)),
            cover: dto.cover.filter(|c| !c.is_empty()),
            synopsis: dto.synopsis,
        };
        validate_book(&book)?;
        Ok(book)
    }
}

impl From<OfferDto> for Offer {
    fn from(dto: OfferDto) -> Self {
        match dto.kind.as_str() {
            OFFER_PERCENTAGE => Offer::Percentage {
                value: Percentage::from_bps(units_to_cents(dto.value)),
            },
            OFFER_MINUS => Offer::Minus {
                value: Money::from_cents(units_to_cents(dto.value)),
            },
            OFFER_SLICE => Offer::Slice {
                value: Money::from_cents(units_to_cents(dto.value)),
                slice_value: Money::from_cents(units_to_cents(dto.slice_value.unwrap_or(0.0))),
            },
            _ => Offer::Unknown { kind: dto.kind },
        }
    }
}

impl From<OffersResponse> for CommercialOffers {
    fn from(response: OffersResponse) -> Self {
        CommercialOffers::new(response.offers.into_iter().map(Offer::from).collect())
    }
}

/// Parses a `GET /books` body.
///
/// Invalid entries are logged and left out; the rest of the listing is kept
/// in catalog order.
pub fn parse_books(dtos: Vec<BookDto>) -> Vec<Book> {
    dtos.into_iter()
        .filter_map(|dto| {
            let isbn = dto.isbn.clone();
            match Book::try_from(dto) {
                Ok(book) => Some(book),
                Err(e) => {
                    warn!(%isbn, error = %e, "Skipping invalid book from catalog");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_to_cents() {
        assert_eq!(units_to_cents(35.0), 3500);
        assert_eq!(units_to_cents(12.5), 1250);
        assert_eq!(units_to_cents(0.1 + 0.2), 30);
        assert_eq!(units_to_cents(f64::NAN), 0);
        assert_eq!(units_to_cents(-1.0), -100);
    }

    #[test]
    fn test_book_from_json() {
        let json = r#"{
            "isbn": "c8fabf68-8374-48fe-a7ea-a00ccd07afff",
            "title": "Henri Potier à l'école des sorciers",
            "price": 35,
            "cover": "http://henri-potier.xebia.fr/hp0.jpg",
            "synopsis": ["Après la mort de ses parents..."]
        }"#;

        let dto: BookDto = serde_json::from_str(json).unwrap();
        let book = Book::try_from(dto).unwrap();

        assert_eq!(book.isbn, "c8fabf68-8374-48fe-a7ea-a00ccd07afff");
        assert_eq!(book.price, Money::from_units(35));
        assert!(book.cover.is_some());
        assert_eq!(book.synopsis.len(), 1);
    }

    #[test]
    fn test_book_without_optional_fields() {
        let dto: BookDto = serde_json::from_str(r#"{"isbn":"a","title":"A","price":9.99}"#).unwrap();
        let book = Book::try_from(dto).unwrap();
        assert_eq!(book.price, Money::from_cents(999));
        assert_eq!(book.cover, None);
        assert!(book.synopsis.is_empty());
    }

    #[test]
    fn test_invalid_book_rejected() {
        let dto = BookDto {
            isbn: "  ".into(),
            title: "Blank".into(),
            price: 1.0,
            cover: None,
            synopsis: vec![],
        };
        assert!(matches!(Book::try_from(dto), Err(CatalogError::InvalidBook(_))));

        let negative = BookDto {
            isbn: "x".into(),
            title: "Negative".into(),
            price: -5.0,
            cover: None,
            synopsis: vec![],
        };
        assert!(matches!(Book::try_from(negative), Err(CatalogError::InvalidBook(_))));
    }

    #[test]
    fn test_listing_keeps_valid_books() {
        let json = r#"[
            {"isbn":"a","title":"First","price":35},
            {"isbn":"","title":"No ISBN","price":10},
            {"isbn":"b","title":"Negative","price":-5},
            {"isbn":"c","title":"Priceless","price":1e12},
            {"isbn":"d","title":"Last","price":29.9}
        ]"#;

        let dtos: Vec<BookDto> = serde_json::from_str(json).unwrap();
        let books = parse_books(dtos);

        let isbns: Vec<&str> = books.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, ["a", "d"]);
        assert_eq!(books[1].price, Money::from_cents(2990));
        assert!(parse_books(vec![]).is_empty());
    }

    #[test]
    fn test_offers_from_json() {
        let json = r#"{"offers":[
            {"type":"percentage","value":5},
            {"type":"minus","value":15},
            {"type":"slice","sliceValue":100,"value":12},
            {"type":"bogo","value":1}
        ]}"#;

        let response: OffersResponse = serde_json::from_str(json).unwrap();
        let offers = CommercialOffers::from(response);

        assert_eq!(
            offers.offers,
            vec![
                Offer::Percentage { value: Percentage::from_percent(5) },
                Offer::Minus { value: Money::from_units(15) },
                Offer::Slice {
                    value: Money::from_units(12),
                    slice_value: Money::from_units(100),
                },
                Offer::Unknown { kind: "bogo".into() },
            ]
        );
    }

    #[test]
    fn test_slice_without_slice_value_maps_to_zero() {
        let dto: OfferDto = serde_json::from_str(r#"{"type":"slice","value":12}"#).unwrap();
        assert_eq!(
            Offer::from(dto),
            Offer::Slice {
                value: Money::from_units(12),
                slice_value: Money::zero(),
            }
        );
    }

    #[test]
    fn test_empty_offers_body() {
        let response: OffersResponse = serde_json::from_str("{}").unwrap();
        assert!(CommercialOffers::from(response).is_empty());
    }
}
