//! Payload codec for the sales queue.
//!
//! Every entry is a JSON object holding the full sale plus a `schemaVersion`
//! integer. Evolution is additive only: readers ignore fields they do not
//! know, and a missing `schemaVersion` means a payload written before the
//! field existed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::sale::Sale;

/// Version written by this producer.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("failed to encode sale: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode sale payload: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct OutgoingRecord<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: u32,
    #[serde(flatten)]
    sale: &'a Sale,
}

/// A payload read back from the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub schema_version: u32,
    pub sale: Sale,
}

// Read on its own pass: `flatten` buffers the document and would lose the
// literal text of numeric amounts.
#[derive(Deserialize)]
struct Version {
    #[serde(rename = "schemaVersion", default)]
    schema_version: u32,
}

/// Encode a sale as a queue payload. Same sale, same bytes.
pub fn encode_sale(sale: &Sale) -> Result<Vec<u8>, WireError> {
    serde_json::to_vec(&OutgoingRecord {
        schema_version: SCHEMA_VERSION,
        sale,
    })
    .map_err(WireError::Encode)
}

/// Decode a queue payload, keeping its schema version.
pub fn decode_record(bytes: &[u8]) -> Result<SaleRecord, WireError> {
    let Version { schema_version } = serde_json::from_slice(bytes).map_err(WireError::Decode)?;
    let sale = serde_json::from_slice(bytes).map_err(WireError::Decode)?;
    Ok(SaleRecord {
        schema_version,
        sale,
    })
}

/// Decode a queue payload into the sale it carries.
pub fn decode_sale(bytes: &[u8]) -> Result<Sale, WireError> {
    decode_record(bytes).map(|record| record.sale)
}
