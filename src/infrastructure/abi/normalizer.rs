//! Converts decoded values into their JSON-safe form

use crate::domain::insight::DecodedValue;

/// Normalize a decoded value for serialization.
///
/// Big integers become decimal strings, byte sequences become 0x hex,
/// addresses become EIP-55 checksummed strings; sequences are mapped
/// element-wise and everything else passes through unchanged.
pub fn normalize(value: DecodedValue) -> DecodedValue {
    match value {
        DecodedValue::Int(i) => DecodedValue::String(i.to_string()),
        DecodedValue::Uint(u) => DecodedValue::String(u.to_string()),
        DecodedValue::Address(addr) => DecodedValue::String(addr.to_checksum(None)),
        DecodedValue::Bytes(bytes) => DecodedValue::String(format!("0x{}", hex::encode(bytes))),
        DecodedValue::Sequence(items) => {
            DecodedValue::Sequence(items.into_iter().map(normalize).collect())
        }
        scalar @ (DecodedValue::Number(_) | DecodedValue::Bool(_) | DecodedValue::String(_)) => {
            scalar
        }
    }
}

/// Normalize an ordered parameter list
pub fn normalize_all(values: Vec<DecodedValue>) -> Vec<DecodedValue> {
    values.into_iter().map(normalize).collect()
}
