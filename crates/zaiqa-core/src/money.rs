//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    Rs 10.00 / 3 = Rs 3.33 (×3 = Rs 9.99)  → Lost Rs 0.01!              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa                                            │
//! │    1000 paisa / 3 = 333 paisa (×3 = 999 paisa)                         │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zaiqa_core::money::Money;
//!
//! // Create from paisa (preferred) or whole rupees
//! let price = Money::from_rupees(500); // Rs 500.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // Rs 1000.00
//! let total = price + Money::from_paisa(2500);   // Rs 525.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paisa for PKR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  MenuItem.price_paisa ──┬──► CartItem (frozen) ──► line_total()        │
/// │                         │                                               │
/// │                         └──► Displayed as "Rs 500.00" in UI            │
/// │                                                                         │
/// │  Cart.subtotal ──► + delivery fee ──► CartTotals.total                 │
/// │  Cart.subtotal ──► Order.total_price_paisa (frozen at checkout)        │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_paisa(50000); // Represents Rs 500.00
    /// assert_eq!(price.paisa(), 50000);
    /// ```
    ///
    /// ## Why Paisa?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Storage, calculations, and the API all use paisa.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Menu prices are whole rupees in practice, so this is the usual
    /// constructor for catalog data.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_rupees(500);
    /// assert_eq!(price.paisa(), 50000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Creates a Money value from major and minor units (rupees and paisa).
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_major_minor(450, 50); // Rs 450.50
    /// assert_eq!(price.paisa(), 45050);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -Rs 5.50 (refund)
    /// assert_eq!(negative.paisa(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -Rs 5.50, not -Rs 4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paisa (smallest currency unit).
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_paisa(45050);
    /// assert_eq!(price.rupees(), 450);
    ///
    /// let negative = Money::from_paisa(-550);
    /// assert_eq!(negative.rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paisa) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_paisa(45050);
    /// assert_eq!(price.paisa_part(), 50);
    ///
    /// let negative = Money::from_paisa(-550);
    /// assert_eq!(negative.paisa_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(500); // Beef burger
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.rupees(), 1000);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Menu Item: Beef Burger Rs 500
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: Rs 1000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}Rs {}.{:02}",
            sign,
            self.rupees().abs(),
            self.paisa_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum of an iterator of Money values (for cart subtotals).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(45050);
        assert_eq!(money.paisa(), 45050);
        assert_eq!(money.rupees(), 450);
        assert_eq!(money.paisa_part(), 50);
    }

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(500);
        assert_eq!(money.paisa(), 50000);
        assert_eq!(money.rupees(), 500);
        assert_eq!(money.paisa_part(), 0);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(450, 50);
        assert_eq!(money.paisa(), 45050);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.paisa(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_rupees(500)), "Rs 500.00");
        assert_eq!(format!("{}", Money::from_paisa(45050)), "Rs 450.50");
        assert_eq!(format!("{}", Money::from_paisa(-550)), "-Rs 5.50");
        assert_eq!(format!("{}", Money::from_paisa(0)), "Rs 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).rupees(), 15);
        assert_eq!((a - b).rupees(), 5);
        let result: Money = a * 3;
        assert_eq!(result.rupees(), 30);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paisa(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_paisa(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_rupees(500);
        let line_total = unit_price.multiply_quantity(2);
        assert_eq!(line_total.rupees(), 1000);
    }

    #[test]
    fn test_sum() {
        let lines = vec![
            Money::from_rupees(500),
            Money::from_rupees(250),
            Money::from_rupees(250),
        ];
        let subtotal: Money = lines.into_iter().sum();
        assert_eq!(subtotal.rupees(), 1000);
    }

    /// Critical test: Verify that Rs 10.00 / 3 × 3 behaves as expected
    /// This documents the intentional precision loss
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_rupees = Money::from_rupees(10);
        // If we split Rs 10.00 three ways: Rs 3.33 each
        let one_third = Money::from_paisa(1000 / 3); // 333 paisa
        let reconstructed: Money = one_third * 3; // 999 paisa

        // We intentionally lose 1 paisa - this is documented behavior
        assert_eq!(reconstructed.paisa(), 999);
        assert_ne!(reconstructed.paisa(), ten_rupees.paisa());

        // Document: 1 paisa was lost
        let lost = ten_rupees - reconstructed;
        assert_eq!(lost.paisa(), 1);
    }
}
