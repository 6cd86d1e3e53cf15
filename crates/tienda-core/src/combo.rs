//! # Combo Pricing
//!
//! Prices a bundle from its constituent products and assesses stock.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Combo Pricing Flow                                 │
//! │                                                                         │
//! │  for each (product, qty) in combo:                                      │
//! │      normalize product base price into the base currency                │
//! │      live_total += normalized_price × qty                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  live_total > 0 ?                                                       │
//! │    yes ──► use it                     (source: live)                    │
//! │    no  ──► use stored base_total_price (source: snapshot)               │
//! │        │     (products deleted/renamed since the combo was saved)       │
//! │        ▼                                                                │
//! │  convert into the shopper's display currency (if different)             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  apply the COMBO's own margin, once, to the converted sum               │
//! │                                                                         │
//! │  NEVER the constituents' margins: combos price from costs. Applying     │
//! │  per-item margins and then the combo margin double-charges the markup.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::convert::{convert_detailed, RateTable};
use crate::margin::apply_margin;
use crate::money::round2;
use crate::types::{Combo, Product};

// =============================================================================
// Combo Pricing
// =============================================================================

/// Where a combo's base total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Recomputed from the live catalog.
    Live,
    /// The combo's persisted `base_total_price` snapshot.
    Snapshot,
}

/// A priced combo, ready for display or persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComboPricing {
    /// Sum of constituent base prices (or the snapshot), in the selected
    /// display currency, rounded to 2 decimals.
    #[ts(as = "String")]
    pub base_price: Decimal,

    /// Base price plus the combo's own margin, rounded to 2 decimals.
    #[ts(as = "String")]
    pub final_price: Decimal,

    /// Live recomputation or snapshot fallback.
    pub priced_from: PriceSource,

    /// True when any conversion along the way could not be fully resolved
    /// from the rate table and an amount passed through partially or 1:1.
    pub estimated: bool,
}

/// Inputs for [`compute_combo_pricing`].
///
/// `rates: None` means no converter is available to this call; prices are
/// then used in their native denomination, which mirrors the legacy
/// behaviour of callers that never passed a convert function.
#[derive(Clone, Copy)]
pub struct ComboPricingParams<'a> {
    pub combo: &'a Combo,
    pub products: &'a [Product],
    pub rates: Option<&'a RateTable>,
    /// The shopper's display currency.
    pub selected_currency: &'a str,
    /// The anchor currency constituent prices are normalized into.
    pub base_currency: &'a str,
    /// Margin used when the combo does not carry its own. `None` falls
    /// through to the platform default inside [`apply_margin`].
    pub default_profit_margin: Option<Decimal>,
}

/// Computes a combo's base and final price.
///
/// Live recomputation wins whenever it yields a positive total; otherwise
/// the combo's persisted snapshot total is used. The combo's own margin is
/// applied exactly once, to the currency-converted base total.
pub fn compute_combo_pricing(params: &ComboPricingParams<'_>) -> ComboPricing {
    let ComboPricingParams {
        combo,
        products,
        rates,
        selected_currency,
        base_currency,
        default_profit_margin,
    } = *params;

    let mut estimated = false;

    // Live recomputation: constituent base prices, normalized to the base
    // currency, times quantity.
    let mut live_total = Decimal::ZERO;
    for product_id in &combo.products {
        let Some(product) = products.iter().find(|p| p.id == *product_id) else {
            continue;
        };
        let quantity = combo.quantity_of(product_id);
        if quantity == 0 {
            continue;
        }

        let mut unit_price = product.base_price;
        let native = product.native_currency(base_currency);
        if native != base_currency {
            if let Some(rates) = rates {
                let conversion =
                    convert_detailed(unit_price, native, base_currency, rates, base_currency);
                estimated |= conversion.is_estimated();
                unit_price = conversion.amount;
            }
        }

        live_total += unit_price * Decimal::from(quantity);
    }
    let live_total = round2(live_total);

    let (priced_from, base_total) = if live_total > Decimal::ZERO {
        (PriceSource::Live, live_total)
    } else {
        debug!(
            combo = %combo.id,
            "live combo total is zero, falling back to stored snapshot"
        );
        (
            PriceSource::Snapshot,
            combo.base_total_price.map(round2).unwrap_or(Decimal::ZERO),
        )
    };

    // Into the shopper's display currency.
    let display_total = if selected_currency != base_currency {
        match rates {
            Some(rates) => {
                let conversion = convert_detailed(
                    base_total,
                    base_currency,
                    selected_currency,
                    rates,
                    base_currency,
                );
                estimated |= conversion.is_estimated();
                conversion.amount
            }
            None => {
                estimated = true;
                base_total
            }
        }
    } else {
        base_total
    };

    let margin = combo.profit_margin.or(default_profit_margin);
    ComboPricing {
        base_price: round2(display_total),
        final_price: apply_margin(display_total, margin),
        priced_from,
        estimated,
    }
}

// =============================================================================
// Stock Assessment
// =============================================================================

/// Why a combo constituent cannot be fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockIssueKind {
    /// No units on hand at all.
    OutOfStock,
    /// Some units on hand, but fewer than the combo requires.
    Insufficient,
}

/// A single constituent's stock problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockIssue {
    pub product_id: String,
    pub product_name: String,
    pub issue: StockIssueKind,
    /// Units the combo requires.
    pub required: i64,
    /// Units actually on hand.
    pub available: i64,
}

/// Reports stock problems for each combo constituent, in combo order.
///
/// Read-only: blocking the checkout on a non-empty result is the caller's
/// decision. Products with untracked inventory (`stock: None`) and ids
/// missing from the catalog report nothing.
pub fn check_combo_stock_issues(combo: &Combo, products: &[Product]) -> Vec<StockIssue> {
    let mut issues = Vec::new();

    for product_id in &combo.products {
        let Some(product) = products.iter().find(|p| p.id == *product_id) else {
            continue;
        };
        let Some(stock) = product.stock else {
            continue;
        };
        let required = combo.quantity_of(product_id);
        if required <= 0 {
            continue;
        }

        if stock <= 0 {
            issues.push(StockIssue {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                issue: StockIssueKind::OutOfStock,
                required,
                available: 0,
            });
        } else if stock < required {
            issues.push(StockIssue {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                issue: StockIssueKind::Insufficient,
                required,
                available: stock,
            });
        }
    }

    issues
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn product(id: &str, base_price: Decimal) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            base_price,
            base_currency_id: None,
            profit_margin: None,
            stock: None,
        }
    }

    fn combo(products: &[&str], quantities: &[(&str, i64)]) -> Combo {
        Combo {
            id: "combo-1".to_string(),
            name: "Test combo".to_string(),
            products: products.iter().map(|id| id.to_string()).collect(),
            product_quantities: quantities
                .iter()
                .map(|(id, qty)| (id.to_string(), *qty))
                .collect::<HashMap<_, _>>(),
            profit_margin: None,
            base_total_price: None,
        }
    }

    fn params<'a>(combo: &'a Combo, products: &'a [Product]) -> ComboPricingParams<'a> {
        ComboPricingParams {
            combo,
            products,
            rates: None,
            selected_currency: "USD",
            base_currency: "USD",
            default_profit_margin: Some(dec!(0)),
        }
    }

    #[test]
    fn test_margin_applied_once_to_the_sum() {
        let products = vec![product("a", dec!(10)), product("b", dec!(20))];
        let mut combo = combo(&["a", "b"], &[]);
        combo.profit_margin = Some(dec!(10));

        let pricing = compute_combo_pricing(&params(&combo, &products));
        assert_eq!(pricing.base_price, dec!(30.00));
        assert_eq!(pricing.final_price, dec!(33.00));
        assert_eq!(pricing.priced_from, PriceSource::Live);
        assert!(!pricing.estimated);
    }

    #[test]
    fn test_quantities_multiply_and_default_to_one() {
        let products = vec![product("a", dec!(10)), product("b", dec!(20))];
        let combo = combo(&["a", "b"], &[("a", 3)]);

        let pricing = compute_combo_pricing(&params(&combo, &products));
        // 3 x 10 + 1 x 20
        assert_eq!(pricing.base_price, dec!(50.00));
    }

    #[test]
    fn test_snapshot_fallback_when_products_are_gone() {
        let mut combo = combo(&["deleted-1", "deleted-2"], &[]);
        combo.base_total_price = Some(dec!(45.5));
        combo.profit_margin = Some(dec!(0));

        let pricing = compute_combo_pricing(&params(&combo, &[]));
        assert_eq!(pricing.base_price, dec!(45.50));
        assert_eq!(pricing.final_price, dec!(45.50));
        assert_eq!(pricing.priced_from, PriceSource::Snapshot);
    }

    #[test]
    fn test_no_snapshot_and_no_products_prices_zero() {
        let combo = combo(&["deleted"], &[]);
        let pricing = compute_combo_pricing(&params(&combo, &[]));
        assert_eq!(pricing.base_price, dec!(0));
        assert_eq!(pricing.final_price, dec!(0));
        assert_eq!(pricing.priced_from, PriceSource::Snapshot);
    }

    #[test]
    fn test_live_total_wins_over_snapshot() {
        let products = vec![product("a", dec!(10))];
        let mut combo = combo(&["a"], &[]);
        combo.base_total_price = Some(dec!(999));

        let pricing = compute_combo_pricing(&params(&combo, &products));
        assert_eq!(pricing.base_price, dec!(10.00));
        assert_eq!(pricing.priced_from, PriceSource::Live);
    }

    #[test]
    fn test_constituent_prices_normalized_to_base_currency() {
        let mut eur_product = product("a", dec!(92));
        eur_product.base_currency_id = Some("EUR".to_string());
        let products = vec![eur_product, product("b", dec!(20))];
        let combo = combo(&["a", "b"], &[]);

        let rates = RateTable::new().with_rate("EUR", "USD", dec!(0.92));
        let mut params = params(&combo, &products);
        params.rates = Some(&rates);

        let pricing = compute_combo_pricing(&params);
        // The USD/USD leg is absent, so the direct EUR/USD pair governs:
        // 92 EUR x 0.92 = 84.64 USD, plus 20.
        assert_eq!(pricing.base_price, dec!(104.64));
        assert!(!pricing.estimated);
    }

    #[test]
    fn test_display_currency_conversion() {
        let products = vec![product("a", dec!(10))];
        let combo = combo(&["a"], &[]);

        let rates = RateTable::new().with_rate("USD", "CUP", dec!(120));
        let mut params = params(&combo, &products);
        params.rates = Some(&rates);
        params.selected_currency = "CUP";

        let pricing = compute_combo_pricing(&params);
        assert_eq!(pricing.base_price, dec!(1200.00));
    }

    #[test]
    fn test_missing_display_rate_is_estimated() {
        let products = vec![product("a", dec!(10))];
        let combo = combo(&["a"], &[]);

        let mut params = params(&combo, &products);
        params.selected_currency = "CUP";

        // No rate table at all: price shown 1:1, flagged estimated.
        let pricing = compute_combo_pricing(&params);
        assert_eq!(pricing.base_price, dec!(10.00));
        assert!(pricing.estimated);
    }

    #[test]
    fn test_default_margin_used_when_combo_has_none() {
        let products = vec![product("a", dec!(100))];
        let combo = combo(&["a"], &[]);

        let mut params = params(&combo, &products);
        params.default_profit_margin = Some(dec!(25));

        let pricing = compute_combo_pricing(&params);
        assert_eq!(pricing.final_price, dec!(125.00));
    }

    #[test]
    fn test_stock_insufficient() {
        let mut p = product("a", dec!(10));
        p.stock = Some(1);
        let products = vec![p];
        let combo = combo(&["a"], &[("a", 3)]);

        let issues = check_combo_stock_issues(&combo, &products);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, StockIssueKind::Insufficient);
        assert_eq!(issues[0].required, 3);
        assert_eq!(issues[0].available, 1);
        assert_eq!(issues[0].product_name, "Product a");
    }

    #[test]
    fn test_stock_out_of_stock() {
        let mut p = product("a", dec!(10));
        p.stock = Some(0);
        let products = vec![p];
        let combo = combo(&["a"], &[]);

        let issues = check_combo_stock_issues(&combo, &products);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, StockIssueKind::OutOfStock);
        assert_eq!(issues[0].available, 0);
    }

    #[test]
    fn test_stock_ok_and_untracked_report_nothing() {
        let mut tracked = product("a", dec!(10));
        tracked.stock = Some(5);
        let untracked = product("b", dec!(20));
        let products = vec![tracked, untracked];
        let combo = combo(&["a", "b"], &[("a", 5), ("b", 99)]);

        assert!(check_combo_stock_issues(&combo, &products).is_empty());
    }

    #[test]
    fn test_stock_issues_keep_combo_order() {
        let mut first = product("a", dec!(10));
        first.stock = Some(0);
        let mut second = product("b", dec!(10));
        second.stock = Some(1);
        let products = vec![second.clone(), first.clone()];
        let combo = combo(&["a", "b"], &[("b", 4)]);

        let issues = check_combo_stock_issues(&combo, &products);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].product_id, "a");
        assert_eq!(issues[1].product_id, "b");
    }

    #[test]
    fn test_stock_issue_serializes_camel_case() {
        let issue = StockIssue {
            product_id: "a".to_string(),
            product_name: "Product a".to_string(),
            issue: StockIssueKind::Insufficient,
            required: 3,
            available: 1,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["productName"], "Product a");
        assert_eq!(json["issue"], "insufficient");
    }
}
