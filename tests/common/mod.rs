use serde_json::Value;

const SAMPLE_SALE: &str = include_str!("../fixtures/sale.json");

/// A complete, valid sale document in its wire shape.
pub fn sample_sale_json() -> Value {
    serde_json::from_str(SAMPLE_SALE).expect("fixture is valid JSON")
}
