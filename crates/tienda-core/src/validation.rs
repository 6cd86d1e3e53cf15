//! # Validation Module
//!
//! Input validation for data entering the pricing engine.
//!
//! ## Validation Strategy
//! The calculation layer deliberately degrades on bad data (clamped
//! percentages, absent rates, zeroed amounts) so a checkout can always
//! render a price. These validators exist so the *admin and ingestion*
//! layers can reject that bad data loudly before it is ever stored:
//! an offer with a 130% discount, a rate table with a zero rate, a
//! lower-case currency code. Run them at the write path; the read path
//! stays forgiving.
//!
//! ## Usage
//! ```rust
//! use tienda_core::validation::{validate_currency_code, validate_quantity};
//!
//! validate_currency_code("USD").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_currency_code("usd").is_err());
//! ```

use rust_decimal::Decimal;

use crate::convert::RateTable;
use crate::error::{ValidationError, ValidationResult};
use crate::types::{DiscountType, Offer};

// =============================================================================
// Scalar Validators
// =============================================================================

/// Validates a currency code.
///
/// ## Rules
/// - 2 to 5 characters, upper-case ASCII letters only
///
/// The conversion layer matches codes exactly (case-sensitive), so a
/// lower-case code would silently never match any rate table entry.
/// Rejecting it here is what keeps that rule safe.
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency code".to_string(),
        });
    }

    if code.len() < 2 || code.len() > 5 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency code".to_string(),
            reason: "must be 2-5 upper-case ASCII letters".to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount (prices, subtotals, shipping).
///
/// Zero is allowed; free items and free shipping exist.
pub fn validate_amount(field: &str, amount: Decimal) -> ValidationResult<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage is within `[0, 100]`.
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Validates a combo constituent quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Structured Validators
// =============================================================================

/// Validates an admin-authored promotional offer.
///
/// ## Rules
/// - id must be non-empty (an empty id reads as "no offer" downstream)
/// - discount_value must not be negative; percentage offers stay in `[0, 100]`
/// - min_purchase_amount / max_discount_amount must not be negative
pub fn validate_offer(offer: &Offer) -> ValidationResult<()> {
    if offer.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "offer id".to_string(),
        });
    }

    match offer.discount_type {
        DiscountType::Percentage => validate_percent("discount_value", offer.discount_value)?,
        DiscountType::FixedAmount => validate_amount("discount_value", offer.discount_value)?,
    }

    if let Some(min_purchase) = offer.min_purchase_amount {
        validate_amount("min_purchase_amount", min_purchase)?;
    }
    if let Some(max_discount) = offer.max_discount_amount {
        validate_amount("max_discount_amount", max_discount)?;
    }

    Ok(())
}

/// Validates a rate table snapshot before it is stored or trusted.
///
/// The converter would quietly skip these entries; ingestion should not.
///
/// ## Rules
/// - every key is `"{FROM}/{TO}"` with both sides valid currency codes
/// - every rate is strictly positive
pub fn validate_rate_table(rates: &RateTable) -> ValidationResult<()> {
    for (key, rate) in rates.iter() {
        let (from, to) = key.split_once('/').ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: format!("rate key {key}"),
                reason: "expected \"{FROM}/{TO}\"".to_string(),
            }
        })?;
        validate_currency_code(from)?;
        validate_currency_code(to)?;

        if rate <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveRate {
                pair: key.to_string(),
                rate,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
