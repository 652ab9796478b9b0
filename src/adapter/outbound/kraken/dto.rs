//! Kraken REST data transfer objects.
//!
//! Kraken wraps every response in `{"error": [...], "result": ...}` and
//! reports amounts as strings (older clients saw floats). Both shapes are
//! converted to [`Decimal`] here, before anything else sees them. A `null`
//! amount reads as zero, like an empty string.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::domain::money::{decimal_from_f64, decimal_from_str};
use crate::domain::DcaOrderSpec;

/// Response envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct KrakenEnvelope<T> {
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<T>,
}

/// Parameters for `AddOrder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOrderRequest {
    pub pair: String,
    pub direction: String,
    pub order_type: String,
    pub volume: String,
    pub validate: bool,
}

impl AddOrderRequest {
    #[must_use]
    pub fn from_spec(spec: &DcaOrderSpec) -> Self {
        Self {
            pair: spec.pair.clone(),
            direction: spec.direction.as_str().to_string(),
            order_type: spec.order_kind.clone(),
            volume: spec.volume.to_string(),
            validate: spec.validate,
        }
    }

    /// Form fields in the order Kraken documents them.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ordertype", self.order_type.clone()),
            ("type", self.direction.clone()),
            ("volume", self.volume.clone()),
            ("pair", self.pair.clone()),
        ];
        if self.validate {
            fields.push(("validate", "true".to_string()));
        }
        fields
    }
}

/// `AddOrder` result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddOrderResult {
    #[serde(default)]
    pub descr: serde_json::Value,
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Order description embedded in query results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KrakenOrderDescription {
    #[serde(default)]
    pub pair: String,
    #[serde(rename = "type", default)]
    pub side: String,
    #[serde(default)]
    pub ordertype: String,
    #[serde(default)]
    pub order: String,
}

/// One entry of a `QueryOrders` result, keyed by transaction id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KrakenOrder {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub opentm: f64,
    #[serde(default)]
    pub closetm: f64,
    #[serde(default, deserialize_with = "wire_decimal")]
    pub vol: Decimal,
    #[serde(default, deserialize_with = "wire_decimal")]
    pub vol_exec: Decimal,
    #[serde(default, deserialize_with = "wire_decimal")]
    pub cost: Decimal,
    #[serde(default, deserialize_with = "wire_decimal")]
    pub fee: Decimal,
    #[serde(default, deserialize_with = "wire_decimal")]
    pub price: Decimal,
    #[serde(default)]
    pub descr: KrakenOrderDescription,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Text(String),
    Number(f64),
    Null,
}

fn wire_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match WireNumber::deserialize(deserializer)? {
        WireNumber::Text(text) => decimal_from_str(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal amount: {text}"))),
        WireNumber::Number(value) => decimal_from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal amount: {value}"))),
        WireNumber::Null => Ok(Decimal::ZERO),
    }
}
