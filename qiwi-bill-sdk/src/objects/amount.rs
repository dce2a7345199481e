//! Money amounts as the API expects them: a decimal with exactly two
//! fractional digits, sent as a string, plus an ISO currency code.
//!
//! Every value is rounded to two decimals, midpoint away from zero, on the
//! exact decimal form of its input. Floats are first converted through their
//! shortest round-trip representation, so `10.005_f64` becomes `"10.01"`.

use compact_str::CompactString;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Errors produced when building a [`MoneyAmount`] value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("invalid amount: {0:?}")]
    Parse(String),
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("amount {0} does not fit with two fractional digits")]
    OutOfRange(String),
}

/// The invoice amount together with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoneyAmount {
    #[serde(serialize_with = "serialize_value", deserialize_with = "deserialize_value")]
    value: Decimal,
    pub currency: CompactString,
}

impl MoneyAmount {
    pub fn new(value: Decimal, currency: impl Into<CompactString>) -> Result<Self, AmountError> {
        Ok(Self {
            value: normalize(value)?,
            currency: currency.into(),
        })
    }

    /// Build an amount from its textual form, e.g. `"100"` or `"10.005"`.
    pub fn from_str_value(
        value: &str,
        currency: impl Into<CompactString>,
    ) -> Result<Self, AmountError> {
        Self::new(parse_decimal(value)?, currency)
    }

    /// Build an amount from a float.
    pub fn from_f64(value: f64, currency: impl Into<CompactString>) -> Result<Self, AmountError> {
        Self::new(decimal_from_f64(value)?, currency)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The two-decimal string sent over the wire.
    pub fn value_string(&self) -> String {
        self.value.to_string()
    }

    pub fn value_number(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }

    pub fn set_value(&mut self, value: Decimal) -> Result<(), AmountError> {
        self.value = normalize(value)?;
        Ok(())
    }

    pub fn set_value_string(&mut self, value: &str) -> Result<(), AmountError> {
        self.value = normalize(parse_decimal(value)?)?;
        Ok(())
    }

    pub fn set_value_number(&mut self, value: f64) -> Result<(), AmountError> {
        self.value = normalize(decimal_from_f64(value)?)?;
        Ok(())
    }
}

impl std::fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

fn normalize(value: Decimal) -> Result<Decimal, AmountError> {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // `rescale` keeps fewer digits when the mantissa would overflow.
    rounded.rescale(2);
    if rounded.scale() != 2 {
        return Err(AmountError::OutOfRange(value.to_string()));
    }
    Ok(rounded)
}

fn parse_decimal(value: &str) -> Result<Decimal, AmountError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::Parse(value.to_owned()))
}

fn decimal_from_f64(value: f64) -> Result<Decimal, AmountError> {
    if !value.is_finite() {
        return Err(AmountError::NotFinite);
    }
    // `Display` for f64 yields the shortest string that round-trips.
    Decimal::from_str(&value.to_string()).map_err(|_| AmountError::OutOfRange(value.to_string()))
}

fn serialize_value<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

fn deserialize_value<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        Number(f64),
    }

    let value = match RawValue::deserialize(deserializer)? {
        RawValue::Text(text) => parse_decimal(&text),
        RawValue::Number(number) => decimal_from_f64(number),
    }
    .and_then(normalize)
    .map_err(serde::de::Error::custom)?;
    Ok(value)
}
