//! # Margin Engine
//!
//! Applies a seller profit margin to a base (cost) price.
//!
//! ## Omitted vs. Explicit Zero
//! The legacy implementation took the margin as a defaulted parameter, so a
//! falsy-but-explicit 0 was silently replaced with the 40% default and some
//! sellers could not configure a zero-markup product at all. Here the two
//! cases are distinct types: `None` means "omitted, use the platform
//! default", `Some(0)` means exactly what it says.

use rust_decimal::Decimal;

use crate::money::{clamp_percent, round2};
use crate::DEFAULT_PROFIT_MARGIN_PERCENT;

/// Applies a profit margin percentage to a base price.
///
/// ## Rules
/// - `margin_percent` is clamped to `[0, 100]`.
/// - `None` falls back to [`DEFAULT_PROFIT_MARGIN_PERCENT`].
/// - A non-positive base price yields 0 (bad data never prices below cost
///   or produces a negative price).
/// - Result is rounded to 2 decimal places.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tienda_core::margin::apply_margin;
///
/// assert_eq!(apply_margin(dec!(100), Some(dec!(25))), dec!(125.00));
/// assert_eq!(apply_margin(dec!(100), Some(dec!(0))), dec!(100.00));
/// assert_eq!(apply_margin(dec!(100), None), dec!(140.00)); // platform default
/// ```
pub fn apply_margin(base_price: Decimal, margin_percent: Option<Decimal>) -> Decimal {
    if base_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let margin = clamp_percent(
        margin_percent.unwrap_or_else(|| Decimal::from(DEFAULT_PROFIT_MARGIN_PERCENT)),
    );

    round2(base_price * (Decimal::ONE + margin / Decimal::ONE_HUNDRED))
}

// =============================================================================
// Unit Tests
// =============================================================================
