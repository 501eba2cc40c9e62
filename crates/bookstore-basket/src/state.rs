//! # Published Values
//!
//! What the store and the engine hand out to subscribers.
//!
//! ```text
//!   BasketStore ──► BasketState { revision: 3, basket }
//!                          │
//!                          ▼
//!   PricingEngine ─► BasketTotal { revision: 3, quote }
//! ```
//!
//! The shared `revision` is what lets a consumer match a total to the basket
//! it was computed for.

use bookstore_core::{Basket, Money, PriceQuote};
use serde::{Deserialize, Serialize};

/// A read-only snapshot of the basket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketState {
    /// Starts at 0; +1 for every mutation that changed the basket.
    pub revision: u64,

    pub basket: Basket,
}

impl BasketState {
    /// Total copies in this snapshot.
    pub fn total_quantity(&self) -> u32 {
        self.basket.total_quantity()
    }
}

/// A price quote tagged with the revision it prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketTotal {
    pub revision: u64,
    pub quote: PriceQuote,
}

impl BasketTotal {
    /// Amount payable.
    pub fn total(&self) -> Money {
        self.quote.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::Book;

    #[test]
    fn test_state_json_shape() {
        let mut basket = Basket::new();
        basket.add_book(&Book::new("a", "A", Money::from_units(10)));
        let state = BasketState { revision: 4, basket };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["revision"], 4);
        assert_eq!(json["basket"]["items"][0]["quantity"], 1);
        assert_eq!(state.total_quantity(), 1);
    }

    #[test]
    fn test_total_accessor() {
        let total = BasketTotal {
            revision: 1,
            quote: PriceQuote::undiscounted(Money::from_units(35)),
        };
        assert_eq!(total.total(), Money::from_units(35));
    }
}
