//! # Order Total Calculator
//!
//! The top-level composition: category discount, promotional offer,
//! shipping, tax, and a fully itemized breakdown for receipts and audit.
//!
//! ## Composition Order (fixed, not caller-reorderable)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Total Composition                              │
//! │                                                                         │
//! │  subtotal                                   100.00                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. category discount (10%)                 -10.00  →  90.00            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. promotional offer (on the 90.00)          -0.00 →  90.00            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. shipping (never discounted)              +5.00  →  95.00            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. tax on (discounted subtotal + shipping)  +0.00                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. total                                    95.00                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every intermediate amount is rounded to 2 decimals independently and
//! surfaced in the output. `total_discount` is the *sum* of the two
//! discount amounts, never re-derived by subtracting totals, so rounding
//! drift can never hide inside the itemization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::build_discount_breakdown;
use crate::money::{clamp_percent, percent_of, round2};
use crate::types::Offer;

/// Inputs for [`calculate_order_total`].
#[derive(Debug, Clone, Default)]
pub struct OrderTotalParams {
    /// Cart subtotal before any discounting. Negative input (bad data)
    /// is treated as zero.
    pub subtotal: Decimal,

    /// Per-category discount percent, clamped to `[0, 100]`.
    pub category_discount_percent: Decimal,

    /// Promotional offer to evaluate, if any.
    pub offer: Option<Offer>,

    /// Shipping cost. Never discounted; negative input is treated as zero.
    pub shipping_cost: Decimal,

    /// Tax percent applied to (discounted subtotal + shipping),
    /// clamped to `[0, 100]`.
    pub tax_percent: Decimal,
}

/// A fully itemized, serializable order total.
///
/// Suitable for persistence as an order snapshot and for direct UI
/// rendering; every field is independently recomputable from the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// The subtotal discounting started from.
    #[ts(as = "String")]
    pub subtotal: Decimal,

    /// Category discount percent, after clamping.
    #[ts(as = "String")]
    pub category_discount_percent: Decimal,

    /// Category discount in absolute terms.
    #[ts(as = "String")]
    pub category_discount_amount: Decimal,

    /// Subtotal after the category discount.
    #[ts(as = "String")]
    pub after_category_discount: Decimal,

    /// Offer discount in absolute terms (zero when not applied).
    #[ts(as = "String")]
    pub offer_discount_amount: Decimal,

    /// Whether the offer's conditions were met.
    pub offer_applied: bool,

    /// Why the offer did not apply, when it didn't.
    pub offer_reason: Option<String>,

    /// Subtotal after both discounts.
    #[ts(as = "String")]
    pub discounted_subtotal: Decimal,

    /// Shipping, as charged.
    #[ts(as = "String")]
    pub shipping_cost: Decimal,

    /// Discounted subtotal plus shipping; the tax base.
    #[ts(as = "String")]
    pub subtotal_with_shipping: Decimal,

    /// Tax percent, after clamping.
    #[ts(as = "String")]
    pub tax_percent: Decimal,

    /// Tax in absolute terms.
    #[ts(as = "String")]
    pub tax_amount: Decimal,

    /// Sum of category and offer discount amounts.
    #[ts(as = "String")]
    pub total_discount: Decimal,

    /// The amount the customer is charged.
    #[ts(as = "String")]
    pub total: Decimal,
}

/// Composes category discount, offer, shipping and tax into a breakdown.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tienda_core::order::{calculate_order_total, OrderTotalParams};
///
/// let breakdown = calculate_order_total(&OrderTotalParams {
///     subtotal: dec!(200),
///     category_discount_percent: dec!(5),
///     shipping_cost: dec!(10),
///     tax_percent: dec!(10),
///     ..OrderTotalParams::default()
/// });
///
/// assert_eq!(breakdown.discounted_subtotal, dec!(190.00));
/// assert_eq!(breakdown.subtotal_with_shipping, dec!(200.00));
/// assert_eq!(breakdown.tax_amount, dec!(20.00));
/// assert_eq!(breakdown.total, dec!(220.00));
/// ```
pub fn calculate_order_total(params: &OrderTotalParams) -> PriceBreakdown {
    let subtotal = round2(params.subtotal.max(Decimal::ZERO));
    let shipping_cost = round2(params.shipping_cost.max(Decimal::ZERO));
    let tax_percent = clamp_percent(params.tax_percent);

    // Steps 1-2: category discount, then the offer on what remains.
    let discounts = build_discount_breakdown(
        subtotal,
        params.category_discount_percent,
        params.offer.as_ref(),
    );

    // Step 3: shipping is added after discounting and is never discounted.
    let subtotal_with_shipping = round2(discounts.final_amount + shipping_cost);

    // Step 4: tax on goods and shipping together.
    let tax_amount = round2(percent_of(subtotal_with_shipping, tax_percent));

    // Step 5.
    let total = round2(subtotal_with_shipping + tax_amount);

    PriceBreakdown {
        subtotal,
        category_discount_percent: discounts.category_discount_percent,
        category_discount_amount: discounts.category_discount_amount,
        after_category_discount: discounts.after_category_discount,
        offer_discount_amount: discounts.offer_discount_amount,
        offer_applied: discounts.offer_applied,
        offer_reason: discounts.offer_reason,
        discounted_subtotal: discounts.final_amount,
        shipping_cost,
        subtotal_with_shipping,
        tax_percent,
        tax_amount,
        total_discount: discounts.total_discount_amount,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_discount_shipping_no_tax() {
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(100),
            category_discount_percent: dec!(10),
            shipping_cost: dec!(5),
            ..OrderTotalParams::default()
        });

        assert_eq!(breakdown.after_category_discount, dec!(90.00));
        assert_eq!(breakdown.subtotal_with_shipping, dec!(95.00));
        assert_eq!(breakdown.tax_amount, dec!(0));
        assert_eq!(breakdown.total, dec!(95.00));
        assert!(!breakdown.offer_applied);
    }

    #[test]
    fn test_full_composition_with_offer_and_tax() {
        let offer = Offer {
            id: "promo".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            min_purchase_amount: None,
            max_discount_amount: None,
        };
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(100),
            category_discount_percent: dec!(10),
            offer: Some(offer),
            shipping_cost: dec!(5),
            tax_percent: dec!(10),
        });

        // 100 -> 90 (category) -> 81 (offer) -> 86 (shipping) -> +8.60 tax
        assert_eq!(breakdown.category_discount_amount, dec!(10.00));
        assert_eq!(breakdown.offer_discount_amount, dec!(9.00));
        assert_eq!(breakdown.discounted_subtotal, dec!(81.00));
        assert_eq!(breakdown.subtotal_with_shipping, dec!(86.00));
        assert_eq!(breakdown.tax_amount, dec!(8.60));
        assert_eq!(breakdown.total_discount, dec!(19.00));
        assert_eq!(breakdown.total, dec!(94.60));
    }

    #[test]
    fn test_shipping_is_never_discounted() {
        let offer = Offer {
            id: "wipeout".to_string(),
            discount_type: DiscountType::FixedAmount,
            discount_value: dec!(1000),
            min_purchase_amount: None,
            max_discount_amount: None,
        };
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(50),
            offer: Some(offer),
            shipping_cost: dec!(7.50),
            ..OrderTotalParams::default()
        });

        // The offer erases the goods, never the shipping.
        assert_eq!(breakdown.discounted_subtotal, dec!(0.00));
        assert_eq!(breakdown.total, dec!(7.50));
    }

    #[test]
    fn test_total_discount_is_a_sum_not_a_difference() {
        let offer = Offer {
            id: "promo".to_string(),
            discount_type: DiscountType::FixedAmount,
            discount_value: dec!(5.55),
            min_purchase_amount: None,
            max_discount_amount: None,
        };
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(99.99),
            category_discount_percent: dec!(12.5),
            offer: Some(offer),
            ..OrderTotalParams::default()
        });

        assert_eq!(
            breakdown.total_discount,
            round2(breakdown.category_discount_amount + breakdown.offer_discount_amount)
        );
    }

    #[test]
    fn test_unmet_offer_surfaces_reason() {
        let offer = Offer {
            id: "promo".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            min_purchase_amount: Some(dec!(500)),
            max_discount_amount: None,
        };
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(100),
            offer: Some(offer),
            ..OrderTotalParams::default()
        });

        assert!(!breakdown.offer_applied);
        assert_eq!(breakdown.offer_discount_amount, dec!(0));
        assert!(breakdown.offer_reason.is_some());
        assert_eq!(breakdown.total, dec!(100.00));
    }

    #[test]
    fn test_negative_inputs_are_zeroed() {
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(-10),
            shipping_cost: dec!(-5),
            tax_percent: dec!(-8),
            ..OrderTotalParams::default()
        });

        assert_eq!(breakdown.subtotal, dec!(0));
        assert_eq!(breakdown.shipping_cost, dec!(0));
        assert_eq!(breakdown.tax_percent, dec!(0));
        assert_eq!(breakdown.total, dec!(0.00));
    }

    #[test]
    fn test_every_field_is_two_decimal_stable() {
        let offer = Offer {
            id: "promo".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(33.33),
            min_purchase_amount: None,
            max_discount_amount: None,
        };
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(123.45),
            category_discount_percent: dec!(7.77),
            offer: Some(offer),
            shipping_cost: dec!(9.99),
            tax_percent: dec!(8.25),
        });

        for (name, value) in [
            ("subtotal", breakdown.subtotal),
            ("category", breakdown.category_discount_amount),
            ("after_category", breakdown.after_category_discount),
            ("offer", breakdown.offer_discount_amount),
            ("discounted", breakdown.discounted_subtotal),
            ("with_shipping", breakdown.subtotal_with_shipping),
            ("tax", breakdown.tax_amount),
            ("total_discount", breakdown.total_discount),
            ("total", breakdown.total),
        ] {
            assert!(value.scale() <= 2, "{name} drifted past 2 decimals: {value}");
        }
    }

    #[test]
    fn test_breakdown_serializes_camel_case() {
        let breakdown = calculate_order_total(&OrderTotalParams {
            subtotal: dec!(100),
            ..OrderTotalParams::default()
        });
        let json = serde_json::to_value(&breakdown).unwrap();
        assert!(json.get("categoryDiscountAmount").is_some());
        assert!(json.get("subtotalWithShipping").is_some());
        assert!(json.get("totalDiscount").is_some());
        assert!(json.get("total_discount").is_none());
    }
}
