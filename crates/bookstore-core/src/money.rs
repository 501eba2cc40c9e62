//! # Money Module
//!
//! Provides the `Money` and `Percentage` types for handling monetary values
//! and discount rates safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    29.99 * 3 = 89.97000000000001  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2999 cents * 3 = 8997 cents                                          │
//! │    Rounding only happens where a rule divides (percentage offers)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::from_cents(3500); // 35.00
//! let line = price * 2u32;             // 70.00
//! let total = line - Money::from_units(15);
//! assert_eq!(total.cents(), 5500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: offers may legitimately drive a total below zero
///   (a flat deduction larger than the basket), and that must stay visible
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - The currency itself is not modelled; the catalog uses one currency
///
/// ## Where Money Flows
/// ```text
/// Book.price ──► BasketLineItem.line_total ──► Basket.subtotal
///                                                   │
///                               offers ──► candidate totals ──► PriceQuote.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(35).cents(), 3500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, clamping at the `i64` bounds.
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 8997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Checked multiplication by a quantity, `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(self, qty: u32) -> Option<Money> {
        self.0.checked_mul(qty as i64).map(Money)
    }

    /// Checked addition, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Addition clamped at the `i64` bounds.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtraction clamped at the `i64` bounds.
    #[inline]
    pub const fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Checked subtraction, `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Checked multiplication by a signed factor, `None` on overflow.
    #[inline]
    pub fn checked_mul(self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Returns what is left after taking `rate` off this amount.
    ///
    /// Computes `amount × (100% − rate)` in basis points and rounds half away
    /// from zero to the nearest cent. The rate is applied literally: a rate
    /// above 100% yields a negative amount, a negative rate inflates it.
    ///
    /// Returns `None` if the result does not fit in an `i64`.
    ///
    /// ```rust
    /// use bookstore_core::money::{Money, Percentage};
    ///
    /// let subtotal = Money::from_units(100);
    /// let left = subtotal.apply_percentage_discount(Percentage::from_percent(10));
    /// assert_eq!(left, Some(Money::from_units(90)));
    /// ```
    pub fn apply_percentage_discount(&self, rate: Percentage) -> Option<Money> {
        let remaining_bps = Percentage::FULL_BPS as i128 - rate.bps() as i128;
        let numerator = self.0 as i128 * remaining_bps;
        let cents = div_round_half_away(numerator, Percentage::FULL_BPS as i128);
        i64::try_from(cents).ok().map(Money)
    }
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round_half_away(num: i128, den: i128) -> i128 {
    let half = den / 2;
    if num >= 0 {
        (num + half) / den
    } else {
        (num - half) / den
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with two decimals and no currency symbol; the
/// front-end owns localisation.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        f.pad(&format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part()))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a basket quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: i64) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%; 1000 bps = 10%. Offers such as "4.5% off" stay
/// exact without floating point.
///
/// Signed and unbounded on purpose: the catalog's values are applied
/// literally, including values outside 0-100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(i64);

impl Percentage {
    /// 100% in basis points.
    pub const FULL_BPS: i64 = 10_000;

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a whole percent value.
    #[inline]
    pub const fn from_percent(percent: i64) -> Self {
        Percentage(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// True when the rate lies in the usual 0-100% range.
    #[inline]
    pub const fn is_within_bounds(&self) -> bool {
        self.0 >= 0 && self.0 <= Self::FULL_BPS
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
