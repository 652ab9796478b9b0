//! Monetary types and exact conversion from wire floats.
//!
//! Settlement amounts are stored as [`Decimal`]. Exchanges that report
//! amounts as binary floats are converted once, at the boundary, through the
//! float's shortest round-trip representation so `100.23` stays `100.23`.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Convert a wire float into an exact decimal.
///
/// Returns `None` for NaN, infinities and magnitudes a [`Decimal`] cannot
/// hold.
#[must_use]
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Parse a wire amount that arrived as text.
#[must_use]
pub fn decimal_from_str(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn float_conversion_keeps_shortest_representation() {
        assert_eq!(decimal_from_f64(100.23), Some(dec!(100.23)));
        assert_eq!(decimal_from_f64(1.23), Some(dec!(1.23)));
        assert_eq!(decimal_from_f64(0.1), Some(dec!(0.1)));
        assert_eq!(decimal_from_f64(20.0), Some(dec!(20)));
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert_eq!(decimal_from_f64(f64::NAN), None);
        assert_eq!(decimal_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn text_amounts_parse_exactly() {
        assert_eq!(decimal_from_str("0.00012345"), Some(dec!(0.00012345)));
        assert_eq!(decimal_from_str(" 5 "), Some(dec!(5)));
        assert_eq!(decimal_from_str(""), Some(Decimal::ZERO));
        assert_eq!(decimal_from_str("1e-3"), Some(dec!(0.001)));
        assert_eq!(decimal_from_str("abc"), None);
    }
}
