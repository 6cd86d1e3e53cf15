//! # Money Module
//!
//! Checkpoint rounding and percentage handling for monetary values.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The legacy pricing code carried that drift through every margin and    │
//! │  discount step, then patched it with ad-hoc re-rounding.                │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal everywhere                         │
//! │    Exact base-10 arithmetic, with ONE rounding rule applied at          │
//! │    defined checkpoints (the function boundaries).                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Integer cents would also be exact, but this engine divides by fractional
//! exchange rates, so amounts stay `Decimal` end to end and are rounded to
//! 2 decimal places at each checkpoint.
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use tienda_core::money::{clamp_percent, round2};
//!
//! assert_eq!(round2(dec!(10.005)), dec!(10.01)); // half away from zero
//! assert_eq!(clamp_percent(dec!(150)), dec!(100));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to 2 decimal places.
///
/// ## Rounding Rule
/// Half away from zero: `10.005` becomes `10.01`. This matches the
/// `round(x * 100) / 100` checkpoint the rest of the platform has always
/// used for stored prices, so recomputed breakdowns agree with persisted
/// order snapshots to the cent.
///
/// Applied **once** at each function boundary, never to intermediate
/// accumulator values.
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a percentage to the valid `[0, 100]` range.
///
/// Out-of-range input is not an error: a negative percentage contributes
/// nothing and anything above 100 saturates. Callers that want to *reject*
/// bad percentages use [`crate::validation::validate_percent`] instead.
#[inline]
pub fn clamp_percent(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Returns `percent` % of `amount`, unrounded.
///
/// The percentage is clamped first. Rounding is left to the caller so the
/// checkpoint rule stays at the function boundary.
#[inline]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * clamp_percent(percent) / Decimal::ONE_HUNDRED
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec!(10.005)), dec!(10.01));
        assert_eq!(round2(dec!(10.004)), dec!(10.00));
        assert_eq!(round2(dec!(-10.005)), dec!(-10.01));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_round2_is_idempotent() {
        let rounded = round2(dec!(19.99));
        assert_eq!(round2(rounded), rounded);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(dec!(-5)), dec!(0));
        assert_eq!(clamp_percent(dec!(0)), dec!(0));
        assert_eq!(clamp_percent(dec!(42.5)), dec!(42.5));
        assert_eq!(clamp_percent(dec!(100)), dec!(100));
        assert_eq!(clamp_percent(dec!(250)), dec!(100));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(200), dec!(10)), dec!(20));
        assert_eq!(percent_of(dec!(200), dec!(-10)), dec!(0));
        assert_eq!(percent_of(dec!(200), dec!(150)), dec!(200));
    }
}
