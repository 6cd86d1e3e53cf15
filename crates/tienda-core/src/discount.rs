//! # Discount Engine
//!
//! Percentage and fixed-amount discounts, promotional offer rules, and the
//! combined category + offer breakdown.
//!
//! ## Stacking Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Stacking                                  │
//! │                                                                         │
//! │  original amount                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  category discount (percent of the ORIGINAL amount)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  promotional offer (evaluated on the POST-category amount)              │
//! │       │   ├── min_purchase gate: unmet ⇒ zero discount, with reason     │
//! │       │   ├── percentage / fixed computation                            │
//! │       │   └── max_discount ceiling                                      │
//! │       ▼                                                                 │
//! │  final amount                                                           │
//! │                                                                         │
//! │  Sequential stacking, never additive on the original base: a 10%        │
//! │  category discount plus a 10% offer is 19%, not 20%.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Offers that do not apply return a structured reason, never an error.
//! A discount can never drive an amount negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{clamp_percent, percent_of, round2};
use crate::types::{DiscountType, Offer};

// =============================================================================
// Basic Percentage Discounts
// =============================================================================

/// The discount amount for `percent` off `price`, rounded to 2 decimals.
///
/// Returns 0 for a non-positive price or percent; the percentage is
/// clamped to `[0, 100]`, so the result can never exceed the price by
/// more than the rounding step.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tienda_core::discount::discount_amount;
///
/// assert_eq!(discount_amount(dec!(80), dec!(25)), dec!(20.00));
/// assert_eq!(discount_amount(dec!(80), dec!(-5)), dec!(0));
/// ```
pub fn discount_amount(price: Decimal, percent: Decimal) -> Decimal {
    if price <= Decimal::ZERO || percent <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2(percent_of(price, percent))
}

/// The price after `percent` off, rounded to 2 decimals.
pub fn apply_discount(price: Decimal, percent: Decimal) -> Decimal {
    round2(price - discount_amount(price, percent))
}

// =============================================================================
// Promotional Offers
// =============================================================================

/// The outcome of evaluating a promotional offer against a subtotal.
///
/// Always returned, never thrown: an offer that does not apply reports
/// `offer_applied == false` with a human-readable `reason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OfferOutcome {
    /// The discount granted, rounded to 2 decimals. Zero when not applied.
    #[ts(as = "String")]
    pub discount_amount: Decimal,

    /// The subtotal after the discount, rounded to 2 decimals. Equal to
    /// the input subtotal when the offer was not applied.
    #[ts(as = "String")]
    pub final_subtotal: Decimal,

    /// Whether the offer's conditions were met and its rule evaluated.
    pub offer_applied: bool,

    /// Why the offer was not applied, when it wasn't.
    pub reason: Option<String>,
}

impl OfferOutcome {
    fn not_applied(subtotal: Decimal, reason: String) -> Self {
        OfferOutcome {
            discount_amount: Decimal::ZERO,
            final_subtotal: subtotal,
            offer_applied: false,
            reason: Some(reason),
        }
    }
}

/// Evaluates a promotional offer against a subtotal.
///
/// ## Rules
/// 1. No offer, or an offer with an empty id, applies nothing.
/// 2. A subtotal below `min_purchase_amount` applies nothing (with reason).
/// 3. `Percentage` offers use [`discount_amount`]; `FixedAmount` offers
///    grant `min(discount_value, subtotal)` so the discount never exceeds
///    what is being discounted.
/// 4. `max_discount_amount`, when present, caps the computed discount.
/// 5. Discount and final subtotal are rounded to 2 decimals.
pub fn apply_offer(subtotal: Decimal, offer: Option<&Offer>) -> OfferOutcome {
    let Some(offer) = offer.filter(|offer| !offer.id.trim().is_empty()) else {
        return OfferOutcome::not_applied(subtotal, "No offer provided".to_string());
    };

    if let Some(min_purchase) = offer.min_purchase_amount {
        if subtotal < min_purchase {
            return OfferOutcome::not_applied(
                subtotal,
                format!("Minimum purchase of {min_purchase} not met"),
            );
        }
    }

    let raw_discount = match offer.discount_type {
        DiscountType::Percentage => discount_amount(subtotal, offer.discount_value),
        // A fixed discount larger than the subtotal only erases it, and a
        // negative discount_value (bad data) grants nothing.
        DiscountType::FixedAmount => offer.discount_value.min(subtotal).max(Decimal::ZERO),
    };

    let capped = match offer.max_discount_amount {
        Some(ceiling) => raw_discount.min(ceiling.max(Decimal::ZERO)),
        None => raw_discount,
    };

    let discount = round2(capped);
    OfferOutcome {
        discount_amount: discount,
        final_subtotal: round2(subtotal - discount),
        offer_applied: true,
        reason: None,
    }
}

// =============================================================================
// Combined Breakdown
// =============================================================================

/// A fully itemized record of category + offer discounting.
///
/// Every field is independently recomputable from the inputs; there is no
/// hidden state. The effective percent exists for display only and is
/// never fed back into a calculation (re-deriving percentages from
/// percentages is how the legacy code drifted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBreakdown {
    /// The amount discounting started from.
    #[ts(as = "String")]
    pub original_amount: Decimal,

    /// Category discount percent, clamped to `[0, 100]`.
    #[ts(as = "String")]
    pub category_discount_percent: Decimal,

    /// Category discount in absolute terms.
    #[ts(as = "String")]
    pub category_discount_amount: Decimal,

    /// Amount after the category discount, before the offer.
    #[ts(as = "String")]
    pub after_category_discount: Decimal,

    /// Offer discount in absolute terms (zero when not applied).
    #[ts(as = "String")]
    pub offer_discount_amount: Decimal,

    /// Whether the offer applied.
    pub offer_applied: bool,

    /// Why the offer did not apply, when it didn't.
    pub offer_reason: Option<String>,

    /// Amount after both discounts.
    #[ts(as = "String")]
    pub final_amount: Decimal,

    /// Sum of the two discount amounts.
    #[ts(as = "String")]
    pub total_discount_amount: Decimal,

    /// Combined absolute discount relative to the original amount,
    /// as a percent. Display only.
    #[ts(as = "String")]
    pub effective_discount_percent: Decimal,
}

/// Applies the category discount, then the offer on the post-category
/// amount, and itemizes the result.
pub fn build_discount_breakdown(
    amount: Decimal,
    category_percent: Decimal,
    offer: Option<&Offer>,
) -> DiscountBreakdown {
    let category_percent = clamp_percent(category_percent);
    let category_amount = discount_amount(amount, category_percent);
    let after_category = round2(amount - category_amount);

    let outcome = apply_offer(after_category, offer);

    let total_discount = round2(category_amount + outcome.discount_amount);
    let effective_percent = if amount > Decimal::ZERO {
        round2(total_discount / amount * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    DiscountBreakdown {
        original_amount: amount,
        category_discount_percent: category_percent,
        category_discount_amount: category_amount,
        after_category_discount: after_category,
        offer_discount_amount: outcome.discount_amount,
        offer_applied: outcome.offer_applied,
        offer_reason: outcome.reason,
        final_amount: outcome.final_subtotal,
        total_discount_amount: total_discount,
        effective_discount_percent: effective_percent,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
