//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are whole Argentine peso amounts in practice, but are kept as
//! [`Decimal`] so imported catalogs with fractional prices survive a round
//! trip. Amounts are kept to cents and capped below a trillion so every
//! stored price survives the trip through a JSON number exactly. Display
//! always rounds to whole pesos.

use core::fmt;
use core::iter::Sum;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::coerce::{decimal_from_value, parse_decimal};

/// Currency symbol used when formatting prices.
pub const CURRENCY_SYMBOL: &str = "$";

/// A non-negative amount in the shop's currency (ARS).
///
/// Serialized as a plain JSON number so stored catalogs stay readable by
/// other tools. Deserialization is lenient: numeric strings are accepted and
/// anything unparseable becomes zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest storable price, 999.999.999.999,99.
    pub const MAX: Self = Self(Decimal::from_parts(276_447_231, 23_283, 0, false, 2));

    /// Create a price, clamping negative amounts to zero and large ones to
    /// [`Price::MAX`]. Fractions are rounded to cents.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            return Self::ZERO;
        }
        let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self(cents.min(Self::MAX.0))
    }

    /// Create a price from a whole amount.
    #[must_use]
    pub fn from_units(units: u64) -> Self {
        Self::new(Decimal::from(units))
    }

    /// Parse a price from free-form text, defaulting to zero.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        parse_decimal(input).map_or(Self::ZERO, Self::new)
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format for display in es-AR style, without fraction digits
    /// (e.g., "$\u{a0}54.999", with a no-break space after the symbol).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let units = rounded.to_u128().unwrap_or(0);
        format!("{CURRENCY_SYMBOL}\u{a0}{}", group_thousands(units))
    }
}

/// Insert `.` between groups of three digits.
fn group_thousands(units: u128) -> String {
    let digits = units.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.0)))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = self.0.normalize();
        if normalized.scale() == 0
            && let Some(units) = normalized.to_i64()
        {
            return serializer.serialize_i64(units);
        }
        match normalized.to_f64() {
            Some(amount) => serializer.serialize_f64(amount),
            None => serializer.serialize_str(&normalized.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value(&value).map_or(Self::ZERO, Self::new))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_units(54_999).display(), "$\u{a0}54.999");
        assert_eq!(Price::from_units(1_234_567).display(), "$\u{a0}1.234.567");
        assert_eq!(Price::from_units(999).display(), "$\u{a0}999");
        assert_eq!(Price::ZERO.display(), "$\u{a0}0");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Price::new(Decimal::new(1005, 1)).display(), "$\u{a0}101");
        assert_eq!(Price::new(Decimal::new(1004, 1)).display(), "$\u{a0}100");
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(Price::new(Decimal::from(-5)), Price::ZERO);
        assert_eq!(Price::parse_lenient("-5"), Price::ZERO);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Price::parse_lenient("37999"), Price::from_units(37_999));
        assert_eq!(Price::parse_lenient("not a price"), Price::ZERO);
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_units(100).times(3), Price::from_units(50).times(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(400));
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(
            serde_json::to_string(&Price::from_units(54_999)).unwrap(),
            "54999"
        );
        assert_eq!(
            serde_json::to_string(&Price::new(Decimal::new(125, 1))).unwrap(),
            "12.5"
        );
    }

    #[test]
    fn test_rounds_to_cents() {
        let p = Price::parse_lenient("19.123456789012345678");
        assert_eq!(p.amount(), Decimal::new(1912, 2));
        assert_eq!(Price::parse_lenient("0.005").amount(), Decimal::new(1, 2));
    }

    #[test]
    fn test_clamps_to_max() {
        assert_eq!(Price::parse_lenient("12345678901234567891"), Price::MAX);
        assert_eq!(Price::from_units(u64::MAX), Price::MAX);
        assert_eq!(Price::MAX.display(), "$\u{a0}1.000.000.000.000");
    }

    #[test]
    fn test_json_number_keeps_stored_amount() {
        for input in [
            "19.123456789012345678",
            "12345678901234567891",
            "987654321098.76",
            "0.1",
            "54999",
        ] {
            let price = Price::parse_lenient(input);
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{input} -> {json}");
        }
    }

    #[test]
    fn test_deserializes_leniently() {
        let p: Price = serde_json::from_str("\"1500\"").unwrap();
        assert_eq!(p, Price::from_units(1500));
        let p: Price = serde_json::from_str("null").unwrap();
        assert_eq!(p, Price::ZERO);
        let p: Price = serde_json::from_str("{\"amount\": 3}").unwrap();
        assert_eq!(p, Price::ZERO);
    }
}
