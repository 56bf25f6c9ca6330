use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One customer transaction as accepted by `POST /sale` and handed to the
/// sales queue.
///
/// Field names and types are the producer/consumer contract. New fields must
/// be optional; existing ones never change name or meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    #[serde(rename = "idSale", alias = "id")]
    pub id: i64,
    pub customer: Customer,
    pub products: Vec<Product>,
    pub payments: Vec<Payment>,
    pub shipping: Shipping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub code: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub code: i64,
    pub quantity: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub card: Card,
    pub billing: Billing,
    pub transaction: Transaction,
    pub verification: Verification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub pan: i64,
    pub expiration_date: DateTime<FixedOffset>,
    pub cardholder_name: String,
    pub card_verification_token: String,
}

/// Billing address. `zip_code` keeps its snake_case wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Billing {
    pub address: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Decimal amount. Written as a string, e.g. "10.50"; numbers are accepted
    /// on input and keep every digit they were sent with.
    #[serde(with = "decimal")]
    #[schema(value_type = String, example = "10.50")]
    pub amount: BigDecimal,
    pub currency_code: String,
    pub payment_method_code: String,
    pub order_number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub authorization_code: String,
    pub transaction_status: String,
    pub transaction_id: String,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Shipping {
    pub geolocation: GeoLocation,
    pub address: ShippingAddress,
    pub receiver: Receiver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub region_code: i8,
    pub region_name: String,
    pub comuna_code: i16,
    pub comuna_name: String,
    pub calle_name: String,
    pub calle_number: String,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Receiver {
    pub name: String,
}

/// Serde adapter for monetary amounts.
///
/// JSON numbers are read from their literal text, so `10.1` stays `10.1` and
/// a 19-digit amount keeps all 19 digits.
mod decimal {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::value::RawValue;

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Reads the amount from its source text so numeric literals never pass
    /// through a float. Requires a deserializer that does not buffer, such as
    /// `serde_json::from_slice`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let literal = raw.get();
        let text = if literal.starts_with('"') {
            serde_json::from_str::<String>(literal).map_err(de::Error::custom)?
        } else {
            literal.to_owned()
        };
        BigDecimal::from_str(text.trim())
            .map_err(|e| de::Error::custom(format!("invalid decimal amount '{}': {}", text, e)))
    }
}
