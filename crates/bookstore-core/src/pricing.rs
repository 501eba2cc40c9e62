//! # Pricing
//!
//! Offer evaluation: one candidate total per offer, the cheapest wins.
//!
//! ## Best Offer Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = Σ price × quantity                                          │
//! │      │                                                                  │
//! │      ├── offers absent / empty ───────────────────────► total = subtotal│
//! │      │                                                                  │
//! │      ├── Percentage(v) ──► subtotal × (100 − v) / 100 ─┐                │
//! │      ├── Minus(v) ───────► subtotal − v ───────────────┤                │
//! │      ├── Slice(v, s) ────► subtotal − round(sub/s) × v ┼──► min ──► total│
//! │      └── Unknown ────────► subtotal ───────────────────┘                │
//! │                                                                         │
//! │  Offers never compound: each candidate starts from the subtotal.        │
//! │  A candidate that fails (zero slice, overflow) is priced as subtotal.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use bookstore_core::{CommercialOffers, Money, Offer, Percentage};
//! use bookstore_core::pricing::best_quote;
//!
//! let offers = CommercialOffers::new(vec![
//!     Offer::Percentage { value: Percentage::from_percent(10) },
//!     Offer::Minus { value: Money::from_units(5) },
//!     Offer::Slice { value: Money::from_units(10), slice_value: Money::from_units(50) },
//! ]);
//!
//! // candidates: 90, 95, 80
//! let quote = best_quote(Money::from_units(100), Some(&offers));
//! assert_eq!(quote.total, Money::from_units(80));
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::{CommercialOffers, Offer};

// =============================================================================
// Price Quote
// =============================================================================

/// The amount payable for a basket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Σ price × quantity, before any offer.
    pub subtotal: Money,

    /// What the customer pays.
    pub total: Money,

    /// The offer that produced `total`, if any offer was evaluated.
    pub applied_offer: Option<Offer>,
}

impl PriceQuote {
    /// A quote with no offer applied.
    pub fn undiscounted(subtotal: Money) -> Self {
        PriceQuote {
            subtotal,
            total: subtotal,
            applied_offer: None,
        }
    }

    /// subtotal − total. Negative when an offer inflates the price.
    ///
    /// Clamps at the money bounds.
    pub fn discount(&self) -> Money {
        self.subtotal.saturating_sub(self.total)
    }
}

// =============================================================================
// Candidate Evaluation
// =============================================================================

/// Computes the total `offer` would produce on its own.
///
/// ## Errors
/// - [`PricingError::ZeroSliceValue`] for a slice offer with `slice_value == 0`
/// - [`PricingError::Overflow`] when the result does not fit in [`Money`]
///
/// ## Example
/// ```rust
/// use bookstore_core::{Money, Offer};
/// use bookstore_core::pricing::candidate_total;
///
/// let slice = Offer::Slice { value: Money::from_units(5), slice_value: Money::from_units(50) };
/// assert_eq!(candidate_total(Money::from_units(100), &slice), Ok(Money::from_units(90)));
/// assert_eq!(candidate_total(Money::from_units(30), &slice), Ok(Money::from_units(30)));
/// ```
pub fn candidate_total(subtotal: Money, offer: &Offer) -> PricingResult<Money> {
    match offer {
        Offer::Percentage { value } => subtotal
            .apply_percentage_discount(*value)
            .ok_or_else(|| overflow(offer)),
        Offer::Minus { value } => subtotal.checked_sub(*value).ok_or_else(|| overflow(offer)),
        Offer::Slice { value, slice_value } => slice_total(subtotal, *value, *slice_value, offer),
        Offer::Unknown { .. } => Ok(subtotal),
    }
}

/// `subtotal − round(subtotal / slice) × value`, or `subtotal` when fewer
/// than one full bracket is spent.
///
/// `round` is half-up (`floor(x + 0.5)`): 1.5 brackets count as 2.
fn slice_total(subtotal: Money, value: Money, slice: Money, offer: &Offer) -> PricingResult<Money> {
    if slice.is_zero() {
        return Err(PricingError::ZeroSliceValue);
    }

    let mut num = subtotal.cents() as i128;
    let mut den = slice.cents() as i128;
    if den < 0 {
        num = -num;
        den = -den;
    }

    // brackets < 1
    if num < den {
        return Ok(subtotal);
    }

    let brackets = (2 * num + den).div_euclid(2 * den);
    let brackets = i64::try_from(brackets).map_err(|_| overflow(offer))?;

    value
        .checked_mul(brackets)
        .and_then(|discount| subtotal.checked_sub(discount))
        .ok_or_else(|| overflow(offer))
}

fn overflow(offer: &Offer) -> PricingError {
    PricingError::Overflow {
        offer: offer.kind().to_string(),
    }
}

// =============================================================================
// Best Offer Selection
// =============================================================================

/// Prices a subtotal against a set of offers and keeps the cheapest result.
///
/// - `None` or an empty offer list: the subtotal, unmodified
/// - Otherwise: the minimum candidate; ties keep the first offer
/// - A failing offer is logged and counts as the plain subtotal, so it can
///   neither abort the computation nor undercut a valid offer
pub fn best_quote(subtotal: Money, offers: Option<&CommercialOffers>) -> PriceQuote {
    let offers = match offers {
        Some(offers) if !offers.is_empty() => offers,
        _ => return PriceQuote::undiscounted(subtotal),
    };

    let mut best: Option<(Money, &Offer)> = None;

    for offer in &offers.offers {
        let candidate = match candidate_total(subtotal, offer) {
            Ok(total) => total,
            Err(e) => {
                warn!(offer = offer.kind(), error = %e, "Offer could not be evaluated, pricing it as no discount");
                subtotal
            }
        };

        match best {
            Some((current, _)) if candidate >= current => {}
            _ => best = Some((candidate, offer)),
        }
    }

    match best {
        Some((total, offer)) => PriceQuote {
            subtotal,
            total,
            applied_offer: Some(offer.clone()),
        },
        None => PriceQuote::undiscounted(subtotal),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
