//! # Amount
//!
//! A validated charge amount. The Flask-era ancestor of this server forwarded
//! whatever string the form carried straight to the gateway; here an amount
//! must parse as a positive decimal with at most two fraction digits before
//! any upstream call is made.

use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum fraction digits accepted for an amount (cents granularity).
const MAX_SCALE: u32 = 2;

/// A positive decimal charge amount, canonicalized to two fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse and validate an amount from a form-submitted string.
    ///
    /// Rejects non-decimal input, zero, negatives, and sub-cent precision.
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "amount must not be empty".to_string(),
            ));
        }

        let value = Decimal::from_str(raw).map_err(|_| {
            PaymentError::InvalidRequest(format!("amount is not a decimal number: {raw:?}"))
        })?;

        if value <= Decimal::ZERO {
            return Err(PaymentError::InvalidRequest(
                "amount must be positive".to_string(),
            ));
        }

        // Trailing zeros don't count against the scale ("10.000" is fine,
        // "1.005" is not).
        let mut value = value.normalize();
        if value.scale() > MAX_SCALE {
            return Err(PaymentError::InvalidRequest(format!(
                "amount has more than {MAX_SCALE} fraction digits: {raw}"
            )));
        }

        // Canonical wire form is always two fraction digits ("10" -> "10.00").
        value.rescale(MAX_SCALE);
        Ok(Self(value))
    }

    /// The underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(Amount::parse("10.00").unwrap().value(), dec!(10.00));
        assert_eq!(Amount::parse("0.01").unwrap().value(), dec!(0.01));
        assert_eq!(Amount::parse(" 25.5 ").unwrap().value(), dec!(25.50));
        // Whole amounts are canonicalized to cents.
        assert_eq!(Amount::parse("10").unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("10.0.0").is_err());
        assert!(Amount::parse("$10").is_err());
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(Amount::parse("0").is_err());
        assert!(Amount::parse("0.00").is_err());
        assert!(Amount::parse("-5.00").is_err());
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        assert!(Amount::parse("1.005").is_err());
        assert!(Amount::parse("0.001").is_err());
        // Trailing zeros are not precision.
        assert_eq!(Amount::parse("10.000").unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_display_is_wire_form() {
        assert_eq!(Amount::parse("7.5").unwrap().to_string(), "7.50");
        assert_eq!(Amount::parse("100").unwrap().to_string(), "100.00");
    }
}
