//! # Error Types
//!
//! Boundary validation errors for tienda-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Error Strategy                                 │
//! │                                                                         │
//! │  Calculation layer (convert / margin / discount / combo / order)        │
//! │  └── NEVER errors. Missing rates, unmet offer conditions and stock      │
//! │      shortages degrade to safe values with structured markers           │
//! │      (ConversionPath, OfferOutcome.reason, StockIssue). A checkout      │
//! │      must always be able to show a price.                               │
//! │                                                                         │
//! │  Boundary layer (validation module, this crate)                         │
//! │  └── ValidationError. Run by admin/ingestion code BEFORE data is        │
//! │      trusted: offer definitions, rate tables, currency codes.           │
//! │                                                                         │
//! │  Flow: ValidationError → caller's API error → admin UI                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, pair, value)
//! 3. Errors are enum variants, never bare Strings

use rust_decimal::Decimal;
use thiserror::Error;

/// Input validation errors.
///
/// These occur when caller-supplied data doesn't meet requirements.
/// Used for early validation before pricing runs, so that the silent
/// degradation inside the calculation layer is a choice, not a surprise.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Invalid format (e.g., malformed currency code or pair key).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An exchange rate that the conversion layer would silently ignore.
    ///
    /// The converter treats non-positive rates as absent. This variant lets
    /// upstream ingestion reject such entries loudly instead.
    #[error("exchange rate for {pair} must be positive, got {rate}")]
    NonPositiveRate { pair: String, rate: Decimal },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::OutOfRange {
            field: "discount_value".to_string(),
            min: dec!(0),
            max: dec!(100),
        };
        assert_eq!(err.to_string(), "discount_value must be between 0 and 100");
    }

    #[test]
    fn test_non_positive_rate_message() {
        let err = ValidationError::NonPositiveRate {
            pair: "EUR/USD".to_string(),
            rate: dec!(0),
        };
        assert_eq!(
            err.to_string(),
            "exchange rate for EUR/USD must be positive, got 0"
        );
    }
}
