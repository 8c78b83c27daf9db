//! Parameter decoding using alloy-dyn-abi

use alloy_dyn_abi::{DynSolType, DynSolValue};
use thiserror::Error;

use super::CallData;
use crate::domain::insight::DecodedValue;

/// Widest integer (in bits) still carried as a plain number
const NUMBER_BITS: usize = 48;

/// Why the arguments of a call could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed function signature '{0}'")]
    MalformedSignature(String),

    #[error("failed to parse type '{ty}': {reason}")]
    UnknownType { ty: String, reason: String },

    #[error("invalid hex in argument data: {0}")]
    ArgumentHex(#[from] hex::FromHexError),

    #[error("failed to decode parameters: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),
}

/// Arguments decoded against a signature's parameter list
#[derive(Debug, Clone)]
pub struct DecodedArguments {
    pub types: Vec<String>,
    pub values: Vec<DecodedValue>,
}

/// Extract the parameter type names between the first `(` and its matching `)`.
///
/// Commas inside nested tuple types do not split. An empty list yields no types.
pub fn parameter_types(signature: &str) -> Result<Vec<String>, DecodeError> {
    let normalized: String = signature.chars().filter(|c| !c.is_whitespace()).collect();
    let malformed = || DecodeError::MalformedSignature(signature.to_string());

    let open = normalized.find('(').ok_or_else(malformed)?;
    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = open + 1;
    let mut closed = false;

    for (offset, ch) in normalized[open..].char_indices() {
        let idx = open + offset;
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    types.push(normalized[start..idx].to_string());
                    closed = true;
                    break;
                }
            }
            ',' if depth == 1 => {
                types.push(normalized[start..idx].to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }

    if !closed {
        return Err(malformed());
    }

    // "()" splits into a single empty entry; that means no parameters
    if types.len() == 1 && types[0].is_empty() {
        types.clear();
    }
    Ok(types)
}

/// Decode the call's argument segment against `signature`
pub fn decode_arguments(
    signature: &str,
    call: &CallData<'_>,
) -> Result<DecodedArguments, DecodeError> {
    let types = parameter_types(signature)?;
    if types.is_empty() {
        return Ok(DecodedArguments {
            types,
            values: Vec::new(),
        });
    }

    let sol_types = types
        .iter()
        .map(|ty| {
            DynSolType::parse(ty).map_err(|e| DecodeError::UnknownType {
                ty: ty.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = call.args_bytes()?;
    let decoded = DynSolType::Tuple(sol_types).abi_decode_params(&data)?;

    let values = match decoded {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    };

    Ok(DecodedArguments {
        types,
        values: values.into_iter().map(decoded_value).collect(),
    })
}

/// Map an alloy value onto the crate's value model
pub fn decoded_value(value: DynSolValue) -> DecodedValue {
    match value {
        DynSolValue::Bool(b) => DecodedValue::Bool(b),
        DynSolValue::Int(i, bits) => {
            if bits <= NUMBER_BITS {
                match i64::try_from(i) {
                    Ok(n) => DecodedValue::Number(n),
                    Err(_) => DecodedValue::Int(i),
                }
            } else {
                DecodedValue::Int(i)
            }
        }
        DynSolValue::Uint(u, bits) => {
            if bits <= NUMBER_BITS {
                match i64::try_from(u) {
                    Ok(n) => DecodedValue::Number(n),
                    Err(_) => DecodedValue::Uint(u),
                }
            } else {
                DecodedValue::Uint(u)
            }
        }
        DynSolValue::FixedBytes(word, size) => {
            DecodedValue::Bytes(word.as_slice()[..size.min(32)].to_vec())
        }
        DynSolValue::Address(addr) => DecodedValue::Address(addr),
        DynSolValue::Function(func) => DecodedValue::Bytes(func.as_slice().to_vec()),
        DynSolValue::Bytes(bytes) => DecodedValue::Bytes(bytes),
        DynSolValue::String(s) => DecodedValue::String(s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            DecodedValue::Sequence(items.into_iter().map(decoded_value).collect())
        }
    }
}
