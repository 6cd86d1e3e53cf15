//! # tienda-core: Pure Pricing Logic for Tienda
//!
//! This crate is the **heart** of Tienda's checkout. It turns a catalog price
//! into the amount a customer is charged, after currency conversion, seller
//! profit margin, per-category discount, promotional offers, shipping and tax.
//! Everything here is a pure function over its arguments.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tienda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront / Checkout / Admin (external)           │   │
//! │  │    product pages ──► cart ──► checkout ──► order snapshot       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process calls                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌───────┐  ┌───────┐ │   │
//! │  │   │ convert │  │ margin  │  │ discount │  │ combo │  │ order │ │   │
//! │  │   │ RateTbl │  │ markup  │  │  offers  │  │bundles│  │totals │ │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └───────┘  └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   Hosted database / rate service (external, snapshot inputs)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Combo, Offer)
//! - [`money`] - Decimal checkpoint rounding and percentage clamping
//! - [`convert`] - Currency conversion over a caller-supplied [`RateTable`]
//! - [`margin`] - Seller profit margin markup
//! - [`discount`] - Percentage/fixed discounts and promotional offers
//! - [`combo`] - Bundle pricing and stock assessment
//! - [`order`] - The top-level order total breakdown
//! - [`error`] - Boundary validation error types
//! - [`validation`] - Input validation for the surrounding application
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal::Decimal`,
//!    rounded to 2 decimal places at defined checkpoints (never floats)
//! 4. **Degrade, Don't Crash**: Missing rates and unmet offer conditions
//!    produce safe defaults and structured reasons, never panics. A checkout
//!    must always be able to show *a* price.
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use tienda_core::{calculate_order_total, OrderTotalParams};
//!
//! let breakdown = calculate_order_total(&OrderTotalParams {
//!     subtotal: dec!(100),
//!     category_discount_percent: dec!(10),
//!     shipping_cost: dec!(5),
//!     ..OrderTotalParams::default()
//! });
//!
//! assert_eq!(breakdown.after_category_discount, dec!(90.00));
//! assert_eq!(breakdown.subtotal_with_shipping, dec!(95.00));
//! assert_eq!(breakdown.total, dec!(95.00));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod combo;
pub mod convert;
pub mod discount;
pub mod error;
pub mod margin;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tienda_core::RateTable` instead of
// `use tienda_core::convert::RateTable`

pub use combo::{
    check_combo_stock_issues, compute_combo_pricing, ComboPricing, ComboPricingParams,
    PriceSource, StockIssue, StockIssueKind,
};
pub use convert::{convert, convert_detailed, Conversion, ConversionPath, RateTable};
pub use discount::{
    apply_discount, apply_offer, build_discount_breakdown, discount_amount, DiscountBreakdown,
    OfferOutcome,
};
pub use error::ValidationError;
pub use margin::apply_margin;
pub use money::{clamp_percent, round2};
pub use order::{calculate_order_total, OrderTotalParams, PriceBreakdown};
pub use types::{Combo, DiscountType, Offer, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default seller profit margin, in percent.
///
/// ## Why a constant?
/// Sellers that never configured a margin get this platform-wide markup.
/// It applies only when a margin is *omitted* (`None`); an explicit zero
/// margin is a legitimate configuration and is never overridden.
pub const DEFAULT_PROFIT_MARGIN_PERCENT: u32 = 40;

/// Default anchor currency for conversions.
///
/// ## Why USD?
/// Catalog base prices and stored exchange rates are anchored to USD.
/// Anchoring every conversion through one base avoids compounding error
/// when many currency pairs are in play.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
