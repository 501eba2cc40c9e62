//! # Validation Module
//!
//! Boundary validation for data entering the basket.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog boundary (bookstore-catalog)                         │
//! │  ├── JSON deserialization (types)                                      │
//! │  └── THIS MODULE: every Book is checked when converted from the wire   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: BasketStore                                                  │
//! │  └── Trusts its input; a malformed Book here is a contract violation   │
//! │      (debug assertion only)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::{Book, Money};
//! use bookstore_core::validation::{validate_book, validate_isbn};
//!
//! validate_isbn("c8fabf68-8374-48fe-a7ea-a00ccd07afff").unwrap();
//!
//! let book = Book::new("", "Untitled", Money::from_units(10));
//! assert!(validate_book(&book).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Book;
use crate::{ISBN_KEY_SEPARATOR, MAX_ISBN_LENGTH, MAX_PRICE_CENTS, MAX_TITLE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an ISBN.
///
/// ## Rules
/// - Must not be empty or blank
/// - At most [`MAX_ISBN_LENGTH`] characters
/// - Letters, digits and hyphens only. In particular it may not contain the
///   lookup key separator, or two baskets could share one key.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_isbn;
///
/// assert!(validate_isbn("978-2-07-054127-0").is_ok());
/// assert!(validate_isbn("").is_err());
/// assert!(validate_isbn("a,b").is_err());
/// ```
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    if isbn.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "isbn".to_string(),
        });
    }

    if isbn.len() > MAX_ISBN_LENGTH {
        return Err(ValidationError::TooLong {
            field: "isbn".to_string(),
            max: MAX_ISBN_LENGTH,
        });
    }

    if !isbn.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "isbn".to_string(),
            reason: format!(
                "must contain only letters, digits and hyphens (no '{}' or spaces)",
                ISBN_KEY_SEPARATOR
            ),
        });
    }

    Ok(())
}

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_TITLE_LENGTH`] characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free books)
/// - At most [`MAX_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(3500).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates every field of a book.
///
/// This is the gate a [`Book`] passes before it can reach the basket.
pub fn validate_book(book: &Book) -> ValidationResult<()> {
    validate_isbn(&book.isbn)?;
    validate_title(&book.title)?;
    validate_price_cents(book.price.cents())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_isbn() {
        assert!(validate_isbn("c8fabf68-8374-48fe-a7ea-a00ccd07afff").is_ok());
        assert!(validate_isbn("9782070541270").is_ok());

        assert!(matches!(
            validate_isbn(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_isbn("   ").is_err());
        assert!(validate_isbn("has space").is_err());
        assert!(validate_isbn("a,b").is_err());
        assert!(matches!(
            validate_isbn(&"1".repeat(MAX_ISBN_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Henri Potier et le Prisonnier d'Azkaban").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"A".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(2900).is_ok());
        assert!(validate_price_cents(-1).is_err());

        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert_eq!(
            validate_price_cents(MAX_PRICE_CENTS + 1),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            })
        );
        assert!(validate_price_cents(i64::MAX / 2 + 1).is_err());
    }

    #[test]
    fn test_validate_book() {
        let book = Book::new("fcd1e6fa", "Henri Potier et la Coupe de feu", Money::from_units(29));
        assert!(validate_book(&book).is_ok());

        let free = Book::new("fcd1e6fa", "Free sample", Money::zero());
        assert!(validate_book(&free).is_ok());

        let negative = Book::new("fcd1e6fa", "Broken", Money::from_cents(-1));
        assert!(matches!(
            validate_book(&negative),
            Err(ValidationError::OutOfRange { .. })
        ));

        let no_isbn = Book::new("", "Orphan", Money::from_units(1));
        assert!(matches!(
            validate_book(&no_isbn),
            Err(ValidationError::Required { .. })
        ));
    }
}
