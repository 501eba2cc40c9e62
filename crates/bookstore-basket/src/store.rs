//! # Basket Store
//!
//! The single live basket, shared by handle and observed through streams.
//!
//! ## Publication Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         BasketStore                                     │
//! │                                                                         │
//! │   add_book / remove_book / clear                                        │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   watch::Sender<BasketState>   (mutate + revision += 1, one lock)       │
//! │            │                                                            │
//! │            ├──► basket_items()   WatchStream<BasketState>               │
//! │            ├──► total_items()    .map(total_quantity)                   │
//! │            ├──► quantity_of(b)   .map(quantity_of(isbn))                │
//! │            └──► subscribe()      PricingEngine                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stream starts with the current state, then yields each later one. A
//! slow subscriber skips intermediate states but always ends on the latest.
//! All derived streams read the same published value, so the item list and
//! the count can never disagree.

use std::sync::Arc;

use bookstore_core::validation::validate_isbn;
use bookstore_core::{Basket, Book};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::state::BasketState;

/// Handle to the live basket. Cloning shares the same basket.
#[derive(Debug, Clone)]
pub struct BasketStore {
    tx: Arc<watch::Sender<BasketState>>,
}

impl Default for BasketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BasketStore {
    /// Creates an empty basket at revision 0.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BasketState::default());
        BasketStore { tx: Arc::new(tx) }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one copy of `book`; returns the new quantity for its ISBN.
    ///
    /// Books are expected to carry a well-formed ISBN and a non-negative
    /// price. Prices above the catalog ceiling are accepted; pricing clamps
    /// a subtotal that no longer fits.
    pub fn add_book(&self, book: &Book) -> u32 {
        debug_assert!(
            validate_isbn(&book.isbn).is_ok() && !book.price.is_negative(),
            "malformed book {:?} reached the basket",
            book.isbn
        );

        let mut quantity = 0;
        self.tx.send_modify(|state| {
            quantity = state.basket.add_book(book);
            state.revision += 1;
        });

        debug!(isbn = %book.isbn, quantity, "Book added to basket");
        quantity
    }

    /// Removes one copy of `book`; returns the remaining quantity.
    ///
    /// Removing a book that is not in the basket changes nothing and
    /// publishes nothing.
    pub fn remove_book(&self, book: &Book) -> u32 {
        let mut remaining = None;
        self.tx.send_if_modified(|state| match state.basket.remove_book(&book.isbn) {
            Some(quantity) => {
                remaining = Some(quantity);
                state.revision += 1;
                true
            }
            None => false,
        });

        match remaining {
            Some(quantity) => {
                debug!(isbn = %book.isbn, quantity, "Book removed from basket");
                quantity
            }
            None => {
                debug!(isbn = %book.isbn, "Remove ignored, book not in basket");
                0
            }
        }
    }

    /// Empties the basket in a single mutation. No-op when already empty.
    pub fn clear(&self) {
        let cleared = self.tx.send_if_modified(|state| {
            if state.basket.is_empty() {
                return false;
            }
            state.basket.clear();
            state.revision += 1;
            true
        });

        if cleared {
            debug!("Basket cleared");
        }
    }

    // =========================================================================
    // Streams
    // =========================================================================

    /// Current state, then every later state.
    pub fn basket_items(&self) -> WatchStream<BasketState> {
        WatchStream::new(self.tx.subscribe())
    }

    /// Current total quantity, then the total after every change.
    pub fn total_items(&self) -> impl Stream<Item = u32> + Send + Unpin + 'static {
        self.basket_items().map(|state| state.total_quantity())
    }

    /// Quantity of this book (0 when absent), recomputed on every change.
    pub fn quantity_of(&self, book: &Book) -> impl Stream<Item = u32> + Send + Unpin + 'static {
        let isbn = book.isbn.clone();
        self.basket_items()
            .map(move |state| state.basket.quantity_of(&isbn))
    }

    /// Raw receiver for consumers that drive their own loop.
    pub fn subscribe(&self) -> watch::Receiver<BasketState> {
        self.tx.subscribe()
    }

    // =========================================================================
    // Synchronous Reads
    // =========================================================================

    /// Copy of the current state.
    pub fn snapshot(&self) -> BasketState {
        self.tx.borrow().clone()
    }

    /// Copy of the current basket.
    pub fn basket(&self) -> Basket {
        self.tx.borrow().basket.clone()
    }

    pub fn total_quantity(&self) -> u32 {
        self.tx.borrow().total_quantity()
    }

    pub fn book_quantity(&self, isbn: &str) -> u32 {
        self.tx.borrow().basket.quantity_of(isbn)
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::Money;

    fn book(isbn: &str, units: i64) -> Book {
        Book::new(isbn, format!("Book {}", isbn), Money::from_units(units))
    }

    #[test]
    fn test_add_and_remove() {
        let store = BasketStore::new();
        let a = book("a", 10);

        assert_eq!(store.add_book(&a), 1);
        assert_eq!(store.add_book(&a), 2);
        assert_eq!(store.book_quantity("a"), 2);
        assert_eq!(store.revision(), 2);

        assert_eq!(store.remove_book(&a), 1);
        assert_eq!(store.remove_book(&a), 0);
        assert_eq!(store.total_quantity(), 0);
        assert_eq!(store.revision(), 4);
    }

    #[test]
    fn test_noop_remove_keeps_revision() {
        let store = BasketStore::new();
        store.add_book(&book("a", 10));

        assert_eq!(store.remove_book(&book("zzz", 1)), 0);
        assert_eq!(store.revision(), 1);
        assert_eq!(store.total_quantity(), 1);
    }

    #[test]
    fn test_clones_share_basket() {
        let store = BasketStore::new();
        let other = store.clone();

        other.add_book(&book("a", 10));
        assert_eq!(store.total_quantity(), 1);
        assert_eq!(store.snapshot(), other.snapshot());
    }

    #[test]
    fn test_clear_publishes_once() {
        let store = BasketStore::new();
        store.clear();
        assert_eq!(store.revision(), 0);

        store.add_book(&book("a", 10));
        store.add_book(&book("b", 10));
        store.clear();
        assert_eq!(store.revision(), 3);
        assert!(store.basket().is_empty());
    }

    #[tokio::test]
    async fn test_streams_replay_latest() {
        let store = BasketStore::new();
        let a = book("a", 10);
        store.add_book(&a);
        store.add_book(&a);

        // Late subscriber sees the current state first.
        let mut items = store.basket_items();
        let first = items.next().await.unwrap();
        assert_eq!(first.revision, 2);
        assert_eq!(first.basket.quantity_of("a"), 2);

        let mut totals = store.total_items();
        assert_eq!(totals.next().await, Some(2));

        store.add_book(&book("b", 5));
        assert_eq!(items.next().await.unwrap().revision, 3);
        assert_eq!(totals.next().await, Some(3));
    }

    #[tokio::test]
    async fn test_quantity_of_stream() {
        let store = BasketStore::new();
        let a = book("a", 10);

        let mut qty = store.quantity_of(&a);
        assert_eq!(qty.next().await, Some(0));

        store.add_book(&a);
        assert_eq!(qty.next().await, Some(1));

        store.remove_book(&a);
        assert_eq!(qty.next().await, Some(0));
    }

    #[tokio::test]
    async fn test_items_and_total_agree() {
        let store = BasketStore::new();
        let mut items = store.basket_items();
        let mut totals = store.total_items();

        let (a, b, c) = (book("a", 1), book("b", 2), book("c", 3));
        let ops = [(&a, true), (&b, true), (&a, false), (&c, true), (&c, true), (&b, false), (&c, false)];
        for (b, add) in ops {
            if add {
                store.add_book(b);
            } else {
                store.remove_book(b);
            }

            let state = items.next().await.unwrap();
            let total = totals.next().await.unwrap();
            assert_eq!(state.total_quantity(), total);
            assert_eq!(state, store.snapshot());
        }
    }

    #[tokio::test]
    async fn test_noop_remove_publishes_nothing() {
        let store = BasketStore::new();
        let mut items = store.basket_items();
        assert_eq!(items.next().await.unwrap().revision, 0);

        store.remove_book(&book("a", 1));
        store.add_book(&book("b", 1));

        // The next value is the add, not the ignored remove.
        let next = items.next().await.unwrap();
        assert_eq!(next.revision, 1);
        assert_eq!(next.basket.quantity_of("b"), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let store = BasketStore::new();
        store.add_book(&book("a", 10));
        let before = store.snapshot();

        store.add_book(&book("a", 10));
        assert_eq!(before.basket.quantity_of("a"), 1);
        assert_eq!(store.book_quantity("a"), 2);
    }
}
