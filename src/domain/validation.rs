//! Turns an inbound payload into a [`Sale`] or refuses it.
//!
//! Pure: no I/O, no logging, safe to call any number of times on the same
//! bytes. Structural problems (bad JSON, wrong types, missing fields,
//! unparseable timestamps) are `Malformed`; documents that decode but break a
//! domain rule are `SemanticViolation`. Unknown fields are ignored.

use bigdecimal::BigDecimal;

use super::errors::ValidationError;
use super::sale::{GeoLocation, Payment, Product, Sale};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Decode and check a sale document.
pub fn parse_sale(payload: &[u8]) -> ValidationResult<Sale> {
    let sale: Sale =
        serde_json::from_slice(payload).map_err(|e| ValidationError::malformed(e.to_string()))?;
    validate_sale(&sale)?;
    Ok(sale)
}

/// Check domain rules on an already decoded sale. Reports the first
/// violation in document order.
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    validate_products(&sale.products)?;
    for (index, payment) in sale.payments.iter().enumerate() {
        validate_payment(index, payment)?;
    }
    validate_geolocation(&sale.shipping.geolocation)
}

// ── Rules ────────────────────────────────────────────────────────────────────

fn validate_products(products: &[Product]) -> ValidationResult<()> {
    if products.is_empty() {
        return Err(ValidationError::violation(
            "products",
            "a sale needs at least one product line",
        ));
    }

    for (index, product) in products.iter().enumerate() {
        if product.quantity <= 0 {
            return Err(ValidationError::violation(
                "products.quantity",
                format!(
                    "line {} (product {}): quantity must be positive, got {}",
                    index, product.code, product.quantity
                ),
            ));
        }
    }

    Ok(())
}

fn validate_payment(index: usize, payment: &Payment) -> ValidationResult<()> {
    let transaction = &payment.transaction;

    if transaction.amount < BigDecimal::from(0) {
        return Err(ValidationError::violation(
            "transaction.amount",
            format!(
                "payment {}: amount must not be negative, got {}",
                index, transaction.amount
            ),
        ));
    }

    let code = &transaction.currency_code;
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::violation(
            "transaction.currencyCode",
            format!(
                "payment {}: expected a three-letter currency code, got '{}'",
                index, code
            ),
        ));
    }

    Ok(())
}

fn validate_geolocation(geo: &GeoLocation) -> ValidationResult<()> {
    if !(-90.0..=90.0).contains(&geo.latitude) || !(-180.0..=180.0).contains(&geo.longitude) {
        return Err(ValidationError::violation(
            "shipping.geolocation",
            format!(
                "coordinates out of range: latitude {}, longitude {}",
                geo.latitude, geo.longitude
            ),
        ));
    }
    Ok(())
}
