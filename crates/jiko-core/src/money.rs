//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    450 × 1.16 = 522.0000000000001  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    450 × 1.16 = 522.00 exactly                                          │
//! │    VAT stays unrounded (72.8 on 455) until a total is rounded to a     │
//! │    whole shilling with half-up rounding                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jiko_core::money::Money;
//! use jiko_core::types::VatRate;
//!
//! let price = Money::from_major(450);
//! let vat = price.calculate_vat(VatRate::default());
//! assert_eq!(vat, Money::from_major(72));
//! assert_eq!(price.with_vat(VatRate::default()).round_whole(), Money::from_major(522));
//! ```

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::VatRate;

/// Half of one whole currency unit, used for half-up rounding.
const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in Kenyan shillings.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 arithmetic, no NaN, no binary drift
/// - **Signed**: intermediate differences (paid - total) may go negative
/// - **JSON number**: serialized as a plain number, the shape the dashboard
///   already stores
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  MenuItem.base_price ──┬──► SaleItem.base_price (+ accompaniments)      │
/// │                        │        │                                       │
/// │                        │        ├──► SaleItem.vat_amount (unrounded)    │
/// │                        │        └──► SaleItem.total_price (rounded)     │
/// │                        │                                                │
/// │                        └──► MenuItem.total_price (rounded)              │
/// │                                                                         │
/// │  Order.subtotal + Order.vat_total ──► Sale.total ──► Sale.change       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole shillings.
    ///
    /// ## Example
    /// ```rust
    /// use jiko_core::money::Money;
    ///
    /// let price = Money::from_major(450);
    /// assert_eq!(price.to_string(), "KSh 450.00");
    /// ```
    #[inline]
    pub fn from_major(shillings: i64) -> Self {
        Money(Decimal::from(shillings))
    }

    /// Converts a finite float into Money.
    ///
    /// Returns `None` for NaN and infinities. Use the boundary validators in
    /// [`crate::validation`] for user input, they also reject negatives.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64(value).map(Money)
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Lossy conversion for display and charts.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to the nearest whole shilling, halves rounding up.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF-UP ROUNDING  floor(x + 0.5)                                   │
    /// │                                                                     │
    /// │    527.8 → 528      527.5 → 528      527.4 → 527                   │
    /// │                                                                     │
    /// │  The shilling is the smallest unit the till handles, so every      │
    /// │  displayed total is a whole number.                                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn round_whole(&self) -> Money {
        Money((self.0 + HALF).floor())
    }

    /// Calculates VAT on this amount. No rounding is applied.
    ///
    /// ## Example
    /// ```rust
    /// use jiko_core::money::Money;
    /// use jiko_core::types::VatRate;
    ///
    /// let vat = Money::from_major(455).calculate_vat(VatRate::default());
    /// assert_eq!(vat.to_string(), "KSh 72.80");
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// Returns `amount × (1 + rate)`, unrounded.
    pub fn with_vat(&self, rate: VatRate) -> Money {
        Money(self.0 * (Decimal::ONE + rate.fraction()))
    }

    /// Multiplies money by a line quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies money by a fractional factor (e.g. unit cost × kg in stock).
    #[inline]
    pub fn scale(&self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }

    /// Returns the larger of two amounts.
    #[inline]
    pub fn max(self, other: Money) -> Money {
        if self >= other {
            self
        } else {
            other
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `KSh 1,234.50`-style text without grouping.
///
/// ## Note
/// This is for logs and receipts. The dashboard formats for display itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-KSh {:.2}", self.0.abs())
        } else {
            write!(f, "KSh {:.2}", self.0)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
