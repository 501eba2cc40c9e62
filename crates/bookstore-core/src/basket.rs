//! # Basket
//!
//! The basket aggregate: an ordered list of line items, one per ISBN.
//!
//! ## Basket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Operations                                    │
//! │                                                                         │
//! │  Front-end Action        Basket call              Effect                │
//! │  ───────────────         ───────────              ──────                │
//! │                                                                         │
//! │  Click "Add" ──────────► add_book(&book) ───────► qty += 1 or push     │
//! │                                                                         │
//! │  Click "Remove" ───────► remove_book(isbn) ─────► qty -= 1 or delete   │
//! │                                                                         │
//! │  Show basket ──────────► items() / subtotal() ──► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This type is pure data. The live, observable basket lives in
//! `bookstore-basket`, which wraps one of these behind a watch channel.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::Book;
use crate::ISBN_KEY_SEPARATOR;

/// A book in the basket and how many copies of it.
///
/// ## Snapshot Semantics
/// `book` is an owned copy taken when the ISBN was first added. Later changes
/// to the caller's `Book` never reach the basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BasketLineItem {
    /// Frozen copy of the book.
    pub book: Book,

    /// Number of copies, always >= 1 while the line exists.
    pub quantity: u32,
}

impl BasketLineItem {
    /// Creates a line for one copy of `book`.
    pub fn from_book(book: &Book) -> Self {
        BasketLineItem {
            book: book.clone(),
            quantity: 1,
        }
    }

    /// ISBN of the line.
    #[inline]
    pub fn isbn(&self) -> &str {
        &self.book.isbn
    }

    /// Unit price × quantity, clamped at the money bounds.
    pub fn line_total(&self) -> Money {
        self.book.price.multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, `None` on overflow.
    pub fn checked_line_total(&self) -> Option<Money> {
        self.book.price.checked_multiply_quantity(self.quantity)
    }
}

/// The basket.
///
/// ## Invariants
/// - Line items are unique by ISBN (adding the same book increments)
/// - Quantity is always > 0 (removing the last copy deletes the line)
/// - Lines keep the order in which their ISBN was first added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    items: Vec<BasketLineItem>,
}

impl Basket {
    /// Creates an empty basket.
    pub fn new() -> Self {
        Basket { items: Vec::new() }
    }

    /// Adds one copy of `book`.
    ///
    /// Returns the new quantity for that ISBN.
    pub fn add_book(&mut self, book: &Book) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.book.isbn == book.isbn) {
            item.quantity += 1;
            return item.quantity;
        }

        self.items.push(BasketLineItem::from_book(book));
        1
    }

    /// Removes one copy of the book with this ISBN.
    ///
    /// Returns the remaining quantity, or `None` if the ISBN was not in the
    /// basket (nothing changed).
    pub fn remove_book(&mut self, isbn: &str) -> Option<u32> {
        let idx = self.items.iter().position(|i| i.book.isbn == isbn)?;

        if self.items[idx].quantity <= 1 {
            self.items.remove(idx);
            return Some(0);
        }

        self.items[idx].quantity -= 1;
        Some(self.items[idx].quantity)
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[BasketLineItem] {
        &self.items
    }

    /// Copies of the given ISBN in the basket (0 if absent).
    pub fn quantity_of(&self, isbn: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.book.isbn == isbn)
            .map_or(0, |i| i.quantity)
    }

    /// Number of distinct books.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of copies across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ price × quantity. Zero for an empty basket.
    ///
    /// Clamps at the money bounds instead of overflowing; use
    /// [`Basket::checked_subtotal`] to tell a clamped value apart.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(BasketLineItem::line_total)
            .fold(Money::zero(), Money::saturating_add)
    }

    /// Σ price × quantity, or [`PricingError::SubtotalOverflow`].
    pub fn checked_subtotal(&self) -> PricingResult<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            item.checked_line_total()
                .and_then(|line| acc.checked_add(line))
                .ok_or(PricingError::SubtotalOverflow)
        })
    }

    /// Checks if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The books in the basket, one per line, in insertion order.
    pub fn books(&self) -> Vec<Book> {
        self.items.iter().map(|i| i.book.clone()).collect()
    }

    /// ISBNs joined with the key separator, in insertion order.
    ///
    /// Offer lookups are keyed by this string, so it must be deterministic
    /// for a given basket.
    pub fn lookup_key(&self) -> String {
        let mut key = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                key.push(ISBN_KEY_SEPARATOR);
            }
            key.push_str(item.isbn());
        }
        key
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_book(isbn: &str, price_units: i64) -> Book {
        Book::new(isbn, format!("Book {}", isbn), Money::from_units(price_units))
    }

    #[test]
    fn test_add_book() {
        let mut basket = Basket::new();
        let book = test_book("a", 35);

        assert_eq!(basket.add_book(&book), 1);

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.total_quantity(), 1);
        assert_eq!(basket.subtotal(), Money::from_units(35));
    }

    #[test]
    fn test_add_same_book_increments_quantity() {
        let mut basket = Basket::new();
        let book = test_book("a", 35);

        basket.add_book(&book);
        basket.add_book(&book);
        assert_eq!(basket.add_book(&book), 3);

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.quantity_of("a"), 3);
    }

    #[test]
    fn test_uniqueness_across_many_adds() {
        let mut basket = Basket::new();
        let books = [test_book("a", 1), test_book("b", 2), test_book("c", 3)];

        for round in 0..4 {
            for (i, book) in books.iter().enumerate() {
                if (round + i) % 2 == 0 {
                    basket.add_book(book);
                }
            }
        }

        let mut isbns: Vec<&str> = basket.items().iter().map(|i| i.isbn()).collect();
        let before = isbns.len();
        isbns.sort_unstable();
        isbns.dedup();
        assert_eq!(isbns.len(), before);
        assert_eq!(basket.total_quantity(), 6);
    }

    #[test]
    fn test_remove_book_decrements_then_deletes() {
        let mut basket = Basket::new();
        let book = test_book("a", 10);

        basket.add_book(&book);
        basket.add_book(&book);

        assert_eq!(basket.remove_book("a"), Some(1));
        assert_eq!(basket.quantity_of("a"), 1);

        assert_eq!(basket.remove_book("a"), Some(0));
        assert!(basket.is_empty());
        assert_eq!(basket.quantity_of("a"), 0);
    }

    #[test]
    fn test_remove_absent_book_is_noop() {
        let mut basket = Basket::new();
        basket.add_book(&test_book("a", 10));

        assert_eq!(basket.remove_book("zzz"), None);
        assert_eq!(basket.total_quantity(), 1);

        basket.remove_book("a");
        assert_eq!(basket.remove_book("a"), None);
        assert_eq!(basket.remove_book("a"), None);
        assert_eq!(basket.total_quantity(), 0);
    }

    #[test]
    fn test_add_remove_symmetry() {
        let mut basket = Basket::new();
        basket.add_book(&test_book("a", 10));
        let before = basket.clone();

        let b = test_book("b", 5);
        basket.add_book(&b);
        basket.remove_book(&b.isbn);
        assert_eq!(basket, before);

        let a = test_book("a", 10);
        basket.add_book(&a);
        basket.remove_book(&a.isbn);
        assert_eq!(basket, before);
    }

    #[test]
    fn test_subtotal() {
        let mut basket = Basket::new();
        let ten = test_book("ten", 10);
        let five = test_book("five", 5);

        basket.add_book(&ten);
        basket.add_book(&ten);
        for _ in 0..3 {
            basket.add_book(&five);
        }

        assert_eq!(basket.subtotal(), Money::from_units(35));
        assert_eq!(Basket::new().subtotal(), Money::zero());
    }

    #[test]
    fn test_subtotal_past_the_money_bounds() {
        let mut basket = Basket::new();
        let huge = Book::new("huge", "Huge", Money::from_cents(i64::MAX / 2 + 1));

        basket.add_book(&huge);
        assert_eq!(basket.checked_subtotal(), Ok(Money::from_cents(i64::MAX / 2 + 1)));

        basket.add_book(&huge);
        assert_eq!(basket.subtotal(), Money::from_cents(i64::MAX));
        assert_eq!(basket.checked_subtotal(), Err(PricingError::SubtotalOverflow));

        // Two lines that fit on their own but not together.
        let mut basket = Basket::new();
        basket.add_book(&huge);
        basket.add_book(&Book::new("other", "Other", Money::from_cents(i64::MAX / 2 + 1)));
        assert_eq!(basket.subtotal(), Money::from_cents(i64::MAX));
        assert!(basket.checked_subtotal().is_err());
    }

    #[test]
    fn test_line_is_a_snapshot() {
        let mut basket = Basket::new();
        let mut book = test_book("a", 10);
        basket.add_book(&book);

        book.price = Money::from_units(99);
        book.title = "Changed".into();

        assert_eq!(basket.items()[0].book.price, Money::from_units(10));
        assert_eq!(basket.items()[0].book.title, "Book a");
    }

    #[test]
    fn test_lookup_key_keeps_insertion_order() {
        let mut basket = Basket::new();
        assert_eq!(basket.lookup_key(), "");

        basket.add_book(&test_book("c", 1));
        basket.add_book(&test_book("a", 1));
        basket.add_book(&test_book("c", 1));
        basket.add_book(&test_book("b", 1));

        assert_eq!(basket.lookup_key(), "c,a,b");
        let isbns: Vec<String> = basket.books().into_iter().map(|b| b.isbn).collect();
        assert_eq!(isbns, ["c", "a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut basket = Basket::new();
        basket.add_book(&test_book("a", 1));
        basket.clear();
        assert!(basket.is_empty());
        assert_eq!(basket.total_quantity(), 0);
    }
}
