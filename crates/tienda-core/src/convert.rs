//! # Currency Conversion
//!
//! Converts amounts between currencies over a caller-supplied [`RateTable`],
//! anchored through a designated base currency.
//!
//! ## Why Anchored Conversion?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Anchored vs. Direct Rates                          │
//! │                                                                         │
//! │  With N currencies, direct rates need N×(N-1) table entries and every   │
//! │  pair drifts independently as admins update them.                       │
//! │                                                                         │
//! │  Anchored: every currency keeps ONE leg against the base.               │
//! │                                                                         │
//! │     EUR ──("EUR/USD")──► USD ──("CUP/USD")──► CUP                       │
//! │                                                                         │
//! │  amount_in_base = amount / rate(from, base)     ← single division       │
//! │  converted      = amount_in_base * rate(to, base)                       │
//! │                                                                         │
//! │  The single division is load-bearing: an earlier revision divided by    │
//! │  the same base leg twice and drifted every multi-currency price.        │
//! │  Never re-anchor an amount that is already in the base currency.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fallback Order
//! 1. **Anchored** - both base legs present.
//! 2. **Direct** - `"{from}/{to}"` entry (legacy two-currency tables).
//! 3. **Inverse** - `"{to}/{from}"` entry, divided.
//! 4. **Best effort** - whatever legs exist, degrading to a 1:1
//!    passthrough when the table has nothing. Degradation is deliberate
//!    (showing *a* price beats failing a checkout) but it is reported:
//!    the [`Conversion`] result marks these paths as estimated and a
//!    warning is logged so data-quality gaps surface upstream.
//!
//! Results are rounded to 2 decimal places once, at the function boundary.
//! The identity short-circuit (same currency, or zero amount) returns the
//! input bit-for-bit.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::money::round2;

// =============================================================================
// Rate Table
// =============================================================================

/// An immutable snapshot of exchange rates, keyed `"{FROM}/{TO}"`.
///
/// A rate means "1 unit of FROM = rate units of TO". Keys are not
/// guaranteed symmetric; the inverse entry may be absent. The table is
/// supplied by the caller per invocation and never mutated here.
///
/// ## Invariant
/// A rate of zero or below is treated as absent. [`RateTable::get`] is the
/// only read path, so a malformed entry can never reach a division.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Creates an empty rate table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a raw `"{FROM}/{TO}" -> rate` mapping, as fetched from the
    /// external rate store.
    pub fn from_rates(rates: HashMap<String, Decimal>) -> Self {
        RateTable { rates }
    }

    /// Builder-style insertion, mostly for tests and fixtures.
    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        self.insert(from, to, rate);
        self
    }

    /// Inserts or replaces the rate for a pair.
    pub fn insert(&mut self, from: &str, to: &str, rate: Decimal) {
        self.rates.insert(Self::pair_key(from, to), rate);
    }

    /// Looks up the rate for a pair. Present but non-positive entries are
    /// reported as absent.
    pub fn get(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates
            .get(&Self::pair_key(from, to))
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    /// The canonical `"{FROM}/{TO}"` key for a pair.
    ///
    /// Currency codes are matched exactly (case-sensitive); normalising
    /// case is the rate supplier's job.
    pub fn pair_key(from: &str, to: &str) -> String {
        format!("{from}/{to}")
    }

    /// Iterates over raw entries, including ones [`RateTable::get`] would
    /// reject. Used by [`crate::validation::validate_rate_table`].
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(key, rate)| (key.as_str(), *rate))
    }

    /// Number of raw entries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

// =============================================================================
// Conversion Result
// =============================================================================

/// How a conversion resolved. Ordered by preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ConversionPath {
    /// Same currency or zero amount; input returned unchanged.
    Identity,
    /// Both base legs present; routed through the base currency.
    Anchored,
    /// Direct `"{from}/{to}"` entry.
    Direct,
    /// Inverse `"{to}/{from}"` entry, divided.
    Inverse,
    /// Only one base leg existed; the result is half-converted.
    PartialAnchor,
    /// No usable rate at all; amount passed through 1:1.
    Unconverted,
}

/// A converted amount together with how it was obtained.
///
/// Callers that persist or display prices check [`Conversion::is_estimated`]
/// and surface estimated conversions as a data-quality defect; the amount
/// itself is still usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    /// The converted amount, rounded to 2 decimal places (identity
    /// conversions excepted, which return the input exactly).
    #[ts(as = "String")]
    pub amount: Decimal,

    /// The path the conversion resolved through.
    pub path: ConversionPath,
}

impl Conversion {
    /// True when the rate table could not fully resolve the pair and the
    /// amount is a best-effort value rather than a real conversion.
    #[inline]
    pub fn is_estimated(&self) -> bool {
        matches!(
            self.path,
            ConversionPath::PartialAnchor | ConversionPath::Unconverted
        )
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Converts `amount` from one currency to another, reporting the path taken.
///
/// This is the engine's **only** conversion arithmetic; [`convert`] is a
/// thin wrapper. Keeping a single entry point is what retired the two
/// divergent legacy implementations and their double-application bug.
///
/// ## Resolution
/// 1. Zero amounts and `from == to` (exact match) return unchanged.
/// 2. Anchored: divide by the `"{from}/{base}"` leg, multiply by the
///    `"{to}/{base}"` leg. Used when both legs are present.
/// 3. Direct `"{from}/{to}"`, then inverse `"{to}/{from}"`.
/// 4. Best effort: the anchored computation with whatever legs existed,
///    which is the unchanged amount when there were none.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tienda_core::convert::{convert_detailed, ConversionPath, RateTable};
///
/// let rates = RateTable::new().with_rate("EUR", "USD", dec!(1.10));
///
/// // USD/USD is absent, so the direct EUR/USD pair governs.
/// let conversion = convert_detailed(dec!(100), "EUR", "USD", &rates, "USD");
/// assert_eq!(conversion.amount, dec!(110.00));
/// assert_eq!(conversion.path, ConversionPath::Direct);
/// assert!(!conversion.is_estimated());
/// ```
pub fn convert_detailed(
    amount: Decimal,
    from: &str,
    to: &str,
    rates: &RateTable,
    base_currency: &str,
) -> Conversion {
    if amount.is_zero() || from == to {
        return Conversion {
            amount,
            path: ConversionPath::Identity,
        };
    }

    // Primary path: anchor both sides to the base currency. Each missing
    // leg leaves the amount untouched for that leg.
    let rate_to_base = rates.get(from, base_currency);
    let rate_from_base = rates.get(to, base_currency);

    let amount_in_base = match rate_to_base {
        Some(rate) => amount / rate,
        None => amount,
    };
    let converted = match rate_from_base {
        Some(rate) => amount_in_base * rate,
        None => amount_in_base,
    };

    if rate_to_base.is_some() && rate_from_base.is_some() {
        return Conversion {
            amount: round2(converted),
            path: ConversionPath::Anchored,
        };
    }

    // Legacy two-currency tables store one direct pair; honour it before
    // giving up on a missing anchor leg.
    if let Some(direct) = rates.get(from, to) {
        return Conversion {
            amount: round2(amount * direct),
            path: ConversionPath::Direct,
        };
    }
    if let Some(inverse) = rates.get(to, from) {
        return Conversion {
            amount: round2(amount / inverse),
            path: ConversionPath::Inverse,
        };
    }

    // Nothing resolved fully. Return the best-effort anchored value and
    // let the caller see that it is an estimate.
    if rate_to_base.is_some() || rate_from_base.is_some() {
        warn!(
            %from,
            %to,
            base = %base_currency,
            "only one anchor leg available, conversion is partial"
        );
        Conversion {
            amount: round2(converted),
            path: ConversionPath::PartialAnchor,
        }
    } else {
        warn!(
            %from,
            %to,
            base = %base_currency,
            "no exchange rate available, amount passed through 1:1"
        );
        Conversion {
            amount: round2(amount),
            path: ConversionPath::Unconverted,
        }
    }
}

/// Converts `amount` from one currency to another.
///
/// Identical to [`convert_detailed`] with the path discarded. Prefer the
/// detailed form anywhere the result is persisted or shown to a customer,
/// so estimated conversions stay visible.
#[inline]
pub fn convert(
    amount: Decimal,
    from: &str,
    to: &str,
    rates: &RateTable,
    base_currency: &str,
) -> Decimal {
    convert_detailed(amount, from, to, rates, base_currency).amount
}

// =============================================================================
// Unit Tests
// =============================================================================
