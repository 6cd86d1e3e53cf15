//! # Domain Types
//!
//! Catalog and promotion types consumed by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────────┐  │
//! │  │    Product      │   │      Combo       │   │       Offer         │  │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────────  │  │
//! │  │  id             │   │  id              │   │  id                 │  │
//! │  │  base_price     │   │  products []     │   │  discount_type      │  │
//! │  │  base_currency  │   │  quantities {}   │   │  discount_value     │  │
//! │  │  profit_margin? │   │  profit_margin?  │   │  min_purchase?      │  │
//! │  │  stock?         │   │  base_total?     │   │  max_discount?      │  │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Boundary Normalisation
//! The hosted database grew two spellings for several fields
//! (`base_total_price` vs `baseTotalPrice`, `profit_margin` vs
//! `profitMargin`). The canonical structs here carry snake_case fields and
//! accept the legacy camelCase spelling through serde aliases, so the
//! dual naming is handled in exactly one place. Business logic never
//! null-coalesces between spellings.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::margin::apply_margin;

// =============================================================================
// Discount Type
// =============================================================================

/// How a promotional offer's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the subtotal (0-100).
    Percentage,
    /// `discount_value` is an absolute amount, capped at the subtotal.
    FixedAmount,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, as read from the hosted database.
///
/// Only the fields the pricing engine needs. Ids are opaque strings owned
/// by the external store; the engine never parses them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (opaque, externally owned).
    pub id: String,

    /// Display name, used in stock issue reports and receipts.
    pub name: String,

    /// Cost price before any margin, in the product's native currency.
    #[ts(as = "String")]
    pub base_price: Decimal,

    /// Currency the base price is denominated in. `None` means the
    /// platform base currency.
    #[serde(default, alias = "baseCurrencyId")]
    pub base_currency_id: Option<String>,

    /// Seller margin for this product, in percent. `None` means the
    /// platform default applies; an explicit 0 means no markup.
    #[serde(default, alias = "profitMargin")]
    #[ts(as = "Option<String>")]
    pub profit_margin: Option<Decimal>,

    /// Units on hand. `None` means inventory is not tracked.
    #[serde(default)]
    pub stock: Option<i64>,
}

impl Product {
    /// The customer-facing unit price: base price plus the seller margin.
    ///
    /// An omitted margin falls back to the platform default
    /// ([`crate::DEFAULT_PROFIT_MARGIN_PERCENT`]); an explicit zero is
    /// honoured as zero.
    #[inline]
    pub fn selling_price(&self) -> Decimal {
        apply_margin(self.base_price, self.profit_margin)
    }

    /// The currency this product's base price is denominated in,
    /// defaulting to the supplied platform base currency.
    #[inline]
    pub fn native_currency<'a>(&'a self, base_currency: &'a str) -> &'a str {
        self.base_currency_id.as_deref().unwrap_or(base_currency)
    }
}

// =============================================================================
// Combo
// =============================================================================

/// A bundle of catalog products sold as a single purchasable unit.
///
/// The combo carries its **own** profit margin, applied once to the sum of
/// constituent base prices. Constituent products' individual margins are
/// deliberately not involved: a combo is priced from costs, not from
/// already-margined retail prices.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Combo {
    /// Unique identifier (opaque, externally owned).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Constituent product ids, in display order.
    #[serde(default)]
    pub products: Vec<String>,

    /// Quantity per product id. A missing entry means quantity 1.
    #[serde(default, alias = "productQuantities")]
    pub product_quantities: HashMap<String, i64>,

    /// The combo's own margin, in percent. `None` means the caller-supplied
    /// default applies.
    #[serde(default, alias = "profitMargin")]
    #[ts(as = "Option<String>")]
    pub profit_margin: Option<Decimal>,

    /// Persisted snapshot of the constituent base total, written when the
    /// combo was last saved. Used when live recomputation comes up empty
    /// (e.g., referenced products were deleted since).
    #[serde(default, alias = "baseTotalPrice")]
    #[ts(as = "Option<String>")]
    pub base_total_price: Option<Decimal>,
}

impl Combo {
    /// Required quantity of a constituent product.
    ///
    /// Missing entries default to 1. Negative entries (bad data) are
    /// treated as 0 so they can never subtract from a bundle.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.product_quantities
            .get(product_id)
            .copied()
            .unwrap_or(1)
            .max(0)
    }
}

// =============================================================================
// Offer
// =============================================================================

/// A promotional discount rule, authored by admins and read-only here.
///
/// ## Lifecycle Invariants
/// - An offer whose `min_purchase_amount` is unmet contributes zero
///   discount (not an error).
/// - `max_discount_amount` is an absolute ceiling on the computed
///   discount, applied after the percentage/fixed computation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Offer {
    /// Unique identifier. An empty id is treated as "no offer".
    pub id: String,

    /// Percentage or fixed amount.
    #[serde(alias = "discountType")]
    pub discount_type: DiscountType,

    /// Percentage (0-100) or absolute amount, per `discount_type`.
    #[serde(alias = "discountValue")]
    #[ts(as = "String")]
    pub discount_value: Decimal,

    /// Minimum subtotal for the offer to apply.
    #[serde(default, alias = "minPurchaseAmount")]
    #[ts(as = "Option<String>")]
    pub min_purchase_amount: Option<Decimal>,

    /// Absolute ceiling on the discount this offer can grant.
    #[serde(default, alias = "maxDiscountAmount")]
    #[ts(as = "Option<String>")]
    pub max_discount_amount: Option<Decimal>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn combo_with_quantities(quantities: &[(&str, i64)]) -> Combo {
        Combo {
            id: "combo-1".to_string(),
            name: "Breakfast pack".to_string(),
            products: quantities.iter().map(|(id, _)| id.to_string()).collect(),
            product_quantities: quantities
                .iter()
                .map(|(id, qty)| (id.to_string(), *qty))
                .collect(),
            profit_margin: None,
            base_total_price: None,
        }
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let combo = combo_with_quantities(&[("bread", 2)]);
        assert_eq!(combo.quantity_of("bread"), 2);
        assert_eq!(combo.quantity_of("coffee"), 1);
    }

    #[test]
    fn test_negative_quantity_is_zeroed() {
        let combo = combo_with_quantities(&[("bread", -3)]);
        assert_eq!(combo.quantity_of("bread"), 0);
    }

    #[test]
    fn test_selling_price_honours_explicit_zero_margin() {
        let product = Product {
            id: "p1".to_string(),
            name: "Rice 1kg".to_string(),
            base_price: dec!(10),
            base_currency_id: None,
            profit_margin: Some(dec!(0)),
            stock: None,
        };
        assert_eq!(product.selling_price(), dec!(10.00));
    }

    #[test]
    fn test_combo_accepts_legacy_camel_case_fields() {
        let combo: Combo = serde_json::from_str(
            r#"{
                "id": "c1",
                "name": "Pack",
                "products": ["a", "b"],
                "productQuantities": {"a": 2},
                "profitMargin": 15,
                "baseTotalPrice": 42.5
            }"#,
        )
        .unwrap();
        assert_eq!(combo.quantity_of("a"), 2);
        assert_eq!(combo.profit_margin, Some(dec!(15)));
        assert_eq!(combo.base_total_price, Some(dec!(42.5)));
    }

    #[test]
    fn test_offer_accepts_both_spellings() {
        let snake: Offer = serde_json::from_str(
            r#"{"id": "o1", "discount_type": "percentage", "discount_value": 10,
                "min_purchase_amount": 50}"#,
        )
        .unwrap();
        let camel: Offer = serde_json::from_str(
            r#"{"id": "o1", "discountType": "percentage", "discountValue": 10,
                "minPurchaseAmount": 50}"#,
        )
        .unwrap();
        assert_eq!(snake.discount_type, DiscountType::Percentage);
        assert_eq!(camel.discount_value, dec!(10));
        assert_eq!(camel.min_purchase_amount, Some(dec!(50)));
    }
}
