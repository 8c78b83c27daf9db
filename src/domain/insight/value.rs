//! Decoded argument values

use alloy_primitives::{Address, I256, U256};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A decoded ABI argument.
///
/// The decoder produces every variant; after normalization only `Number`,
/// `Bool`, `String` and `Sequence` remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// Integer narrow enough to be a JSON number
    Number(i64),
    /// Signed integer wider than a JSON number can hold exactly
    Int(I256),
    /// Unsigned integer wider than a JSON number can hold exactly
    Uint(U256),
    Bool(bool),
    Address(Address),
    Bytes(Vec<u8>),
    String(String),
    /// Arrays and tuples
    Sequence(Vec<DecodedValue>),
}

impl DecodedValue {
    /// True once the value (and every nested value) is JSON-safe
    pub fn is_normalized(&self) -> bool {
        match self {
            Self::Number(_) | Self::Bool(_) | Self::String(_) => true,
            Self::Int(_) | Self::Uint(_) | Self::Address(_) | Self::Bytes(_) => false,
            Self::Sequence(items) => items.iter().all(Self::is_normalized),
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_i64(*n),
            Self::Int(i) => serializer.collect_str(i),
            Self::Uint(u) => serializer.collect_str(u),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Address(addr) => serializer.serialize_str(&addr.to_checksum(None)),
            Self::Bytes(bytes) => serializer.serialize_str(&format!("0x{}", hex::encode(bytes))),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_shapes() {
        let value = DecodedValue::Sequence(vec![
            DecodedValue::Number(7),
            DecodedValue::Uint(U256::from(10).pow(U256::from(30))),
            DecodedValue::Bytes(vec![0xde, 0xad]),
            DecodedValue::Bool(false),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([7, "1000000000000000000000000000000", "0xdead", false])
        );
    }

    #[test]
    fn test_is_normalized() {
        assert!(DecodedValue::Sequence(vec![DecodedValue::String("x".into())]).is_normalized());
        assert!(!DecodedValue::Sequence(vec![DecodedValue::Bytes(vec![1])]).is_normalized());
        assert!(!DecodedValue::Address(Address::ZERO).is_normalized());
    }
}
