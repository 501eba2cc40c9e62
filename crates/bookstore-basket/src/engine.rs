//! # Pricing Engine
//!
//! Background task that keeps a price quote in step with the basket.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pricing Engine Loop                                 │
//! │                                                                         │
//! │   ┌──────────┐  new revision   ┌────────────────────────┐               │
//! │   │  Idle    │ ──────────────► │  Pricing revision N    │               │
//! │   │          │  or Refresh     │  (offer lookup)        │               │
//! │   └──────────┘                 └───────────┬────────────┘               │
//! │        ▲                                   │                            │
//! │        │       lookup done and N is        │   revision N+1 arrives     │
//! │        │       still current: publish      │   first: drop the lookup,  │
//! │        └───────────────────────────────────┤   price N+1 instead        │
//! │                                            │                            │
//! │   Shutdown, handle dropped, or store dropped ──► task exits             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every published [`BasketTotal`] carries the revision it was computed for,
//! and a total is only published while that revision is still the store's
//! current one. A slow lookup for an old basket can never overwrite the
//! price of a newer one.

use std::sync::Arc;

use bookstore_catalog::OfferSource;
use bookstore_core::pricing::best_quote;
use bookstore_core::{Basket, Money, PriceQuote};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::error::{BasketError, BasketResult};
use crate::state::{BasketState, BasketTotal};
use crate::store::BasketStore;

// =============================================================================
// One-shot Pricing
// =============================================================================

/// Prices one basket against `source`.
///
/// An empty basket is priced at zero without a lookup. A failed lookup is
/// logged and priced as if there were no offers, so this never fails.
///
/// A subtotal that overflows the money representation is clamped and
/// returned undiscounted, without a lookup.
pub async fn quote_basket(basket: &Basket, source: &dyn OfferSource) -> PriceQuote {
    if basket.is_empty() {
        return best_quote(Money::zero(), None);
    }

    let subtotal = match basket.checked_subtotal() {
        Ok(subtotal) => subtotal,
        Err(e) => {
            warn!(key = %basket.lookup_key(), error = %e, "Subtotal out of range, pricing without offers");
            return PriceQuote::undiscounted(basket.subtotal());
        }
    };

    let books = basket.books();
    let offers = match source.commercial_offers(&books).await {
        Ok(offers) => offers,
        Err(e) => {
            warn!(
                source = source.source_name(),
                key = %basket.lookup_key(),
                error = %e,
                "Offer lookup failed, pricing without offers"
            );
            None
        }
    };

    best_quote(subtotal, offers.as_ref())
}

// =============================================================================
// Engine Handle
// =============================================================================

/// Commands for the engine task.
#[derive(Debug)]
enum EngineCommand {
    /// Re-fetch offers for the current revision.
    Refresh,
    /// Stop the engine.
    Shutdown,
}

/// Handle for observing and controlling a running engine.
///
/// The engine lives as long as at least one clone of its handle does.
/// Dropping the last clone stops it, and any stream taken from the handle
/// then ends after yielding the last published value.
#[derive(Debug, Clone)]
pub struct PricingHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    totals_rx: watch::Receiver<Option<BasketTotal>>,
}

impl PricingHandle {
    /// Amount payable: the latest total, then every later one.
    ///
    /// Ends once the engine stops; keep a handle alive to keep it flowing.
    pub fn total_price(&self) -> impl Stream<Item = Money> + Send + Unpin + 'static {
        self.quotes().map(|total| total.quote.total)
    }

    /// Full quotes with their revisions: the latest, then every later one.
    ///
    /// Ends once the engine stops.
    pub fn quotes(&self) -> impl Stream<Item = BasketTotal> + Send + Unpin + 'static {
        WatchStream::new(self.totals_rx.clone()).filter_map(|total| total)
    }

    /// The most recently published total, if any.
    pub fn latest(&self) -> Option<BasketTotal> {
        self.totals_rx.borrow().clone()
    }

    /// Waits for a total at `revision` or later.
    pub async fn quote_for(&self, revision: u64) -> BasketResult<BasketTotal> {
        let mut rx = self.totals_rx.clone();
        let total = rx
            .wait_for(|total| total.as_ref().is_some_and(|t| t.revision >= revision))
            .await
            .map_err(|_| BasketError::EngineStopped)?;

        total.clone().ok_or(BasketError::EngineStopped)
    }

    /// Re-prices the current basket with freshly fetched offers.
    pub async fn refresh(&self) -> BasketResult<()> {
        self.cmd_tx
            .send(EngineCommand::Refresh)
            .await
            .map_err(|_| BasketError::EngineStopped)
    }

    /// Stops the engine. The last published total stays readable.
    pub async fn shutdown(&self) -> BasketResult<()> {
        self.cmd_tx
            .send(EngineCommand::Shutdown)
            .await
            .map_err(|_| BasketError::EngineStopped)
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Why the engine woke up.
enum Wake {
    /// The store published a new revision, or a refresh was requested.
    Reprice,
    /// Shutdown, all handles dropped, or the store is gone.
    Stop,
}

/// Turns basket changes into price quotes.
pub struct PricingEngine {
    state_rx: watch::Receiver<BasketState>,
    source: Arc<dyn OfferSource>,
    refresh_on_start: bool,
}

impl PricingEngine {
    /// Creates an engine for `store`, fetching offers from `source`.
    pub fn new(store: &BasketStore, source: Arc<dyn OfferSource>) -> Self {
        PricingEngine {
            state_rx: store.subscribe(),
            source,
            refresh_on_start: true,
        }
    }

    /// Whether the basket is priced as soon as the engine starts (default)
    /// or only after the next mutation.
    pub fn with_refresh_on_start(mut self, refresh_on_start: bool) -> Self {
        self.refresh_on_start = refresh_on_start;
        self
    }

    /// Starts the engine task and returns a handle.
    ///
    /// Must be called from within a Tokio runtime. The task runs until
    /// [`PricingHandle::shutdown`], until every clone of the returned handle
    /// is dropped, or until every clone of the store is dropped.
    pub fn start(self) -> PricingHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (totals_tx, totals_rx) = watch::channel(None);

        tokio::spawn(async move {
            self.run(cmd_rx, totals_tx).await;
        });

        PricingHandle { cmd_tx, totals_rx }
    }

    /// Main engine loop.
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<EngineCommand>,
        totals_tx: watch::Sender<Option<BasketTotal>>,
    ) {
        info!(source = self.source.source_name(), "Pricing engine started");

        let mut pending = self.refresh_on_start;

        loop {
            if pending {
                pending = false;
                let state = self.state_rx.borrow_and_update().clone();
                debug!(revision = state.revision, "Pricing basket");

                let source = Arc::clone(&self.source);
                let lookup = async move {
                    let quote = quote_basket(&state.basket, source.as_ref()).await;
                    (state.revision, quote)
                };
                tokio::pin!(lookup);

                let wake = tokio::select! {
                    (revision, quote) = &mut lookup => {
                        self.publish(&totals_tx, revision, quote);
                        None
                    }
                    changed = self.state_rx.changed() => {
                        debug!("Basket changed during lookup, dropping stale lookup");
                        Some(Self::on_state_change(changed))
                    }
                    cmd = cmd_rx.recv() => Some(Self::on_command(cmd)),
                };

                match wake {
                    None => {}
                    Some(Wake::Reprice) => {
                        pending = true;
                        continue;
                    }
                    Some(Wake::Stop) => break,
                }
            }

            let wake = tokio::select! {
                changed = self.state_rx.changed() => Self::on_state_change(changed),
                cmd = cmd_rx.recv() => Self::on_command(cmd),
            };

            match wake {
                Wake::Reprice => pending = true,
                Wake::Stop => break,
            }
        }

        info!("Pricing engine stopped");
    }

    /// Publishes a quote unless the basket has moved on since the lookup.
    fn publish(&self, totals_tx: &watch::Sender<Option<BasketTotal>>, revision: u64, quote: PriceQuote) {
        let current = self.state_rx.borrow().revision;
        if revision != current {
            debug!(revision, current, "Discarding stale quote");
            return;
        }

        debug!(
            revision,
            subtotal = %quote.subtotal,
            total = %quote.total,
            offer = quote.applied_offer.as_ref().map(|o| o.kind()),
            "Basket priced"
        );
        totals_tx.send_replace(Some(BasketTotal { revision, quote }));
    }

    fn on_state_change(changed: Result<(), watch::error::RecvError>) -> Wake {
        match changed {
            Ok(()) => Wake::Reprice,
            Err(_) => {
                info!("Basket store dropped");
                Wake::Stop
            }
        }
    }

    fn on_command(cmd: Option<EngineCommand>) -> Wake {
        match cmd {
            Some(EngineCommand::Refresh) => Wake::Reprice,
            Some(EngineCommand::Shutdown) => {
                info!("Pricing engine shutting down");
                Wake::Stop
            }
            None => Wake::Stop,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
