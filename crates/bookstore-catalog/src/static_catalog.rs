//! # Static Catalog
//!
//! In-memory [`OfferSource`] for tests and offline runs.
//!
//! Offers are registered per lookup key (ISBNs joined with `,`). A key with
//! no registration answers `Ok(None)`, the same as a 404 from the real API.
//! Latency and failure can be simulated to exercise the pricing engine's
//! stale-result handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bookstore_core::{Book, CommercialOffers};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::source::{lookup_key, OfferSource};

/// In-memory catalog.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    books: Vec<Book>,
    offers: HashMap<String, CommercialOffers>,
    /// Per-key latency overrides; falls back to `latency`.
    key_latency: HashMap<String, Duration>,
    latency: Option<Duration>,
    failing: AtomicBool,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog listing these books.
    pub fn with_books(books: Vec<Book>) -> Self {
        StaticCatalog {
            books,
            ..Self::default()
        }
    }

    /// Registers the offers answered for exactly this set of books.
    pub fn with_offers(mut self, books: &[Book], offers: CommercialOffers) -> Self {
        self.offers.insert(lookup_key(books), offers);
        self
    }

    /// Delays every lookup.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Delays only the lookup for this set of books.
    pub fn with_latency_for(mut self, books: &[Book], latency: Duration) -> Self {
        self.key_latency.insert(lookup_key(books), latency);
        self
    }

    /// Makes every following lookup fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The listed books.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Finds a listed book by ISBN.
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    /// Number of lookups that reached the catalog (empty input excluded).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Lookup keys in the order they were requested.
    pub fn requested_keys(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OfferSource for StaticCatalog {
    async fn commercial_offers(&self, books: &[Book]) -> CatalogResult<Option<CommercialOffers>> {
        if books.is_empty() {
            return Ok(None);
        }

        let key = lookup_key(books);
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(key.clone());
        }

        if let Some(delay) = self.key_latency.get(&key).copied().or(self.latency) {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable(format!("lookup for {} failed", key)));
        }

        let offers = self.offers.get(&key).cloned();
        debug!(key = %key, found = offers.is_some(), "Static offer lookup");
        Ok(offers)
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}
