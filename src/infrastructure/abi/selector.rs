//! Function selector extraction from raw call-data

use alloy_primitives::Selector;

use crate::core::InsightError;

/// Call-data split into its selector and the hex of the encoded arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallData<'a> {
    pub selector: Selector,
    /// Argument hex after the selector, without prefix (may be empty or odd-length)
    pub args_hex: &'a str,
}

impl CallData<'_> {
    /// Selector as lowercase 0x-prefixed hex
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }

    /// Argument bytes; fails on odd-length argument hex
    pub fn args_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(self.args_hex)
    }
}

/// Validate `data` as 0x-prefixed hex and split off the 4-byte selector
pub fn extract_selector(data: &str) -> Result<CallData<'_>, InsightError> {
    let payload = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| InsightError::invalid_input("transaction data is not a valid hex string"))?;

    if payload.len() < 8 {
        return Err(InsightError::invalid_input(format!(
            "transaction data too short: need a 4-byte selector, got {} hex chars",
            payload.len()
        )));
    }

    let (selector_hex, args_hex) = payload.split_at(8);
    let mut selector = [0u8; 4];
    hex::decode_to_slice(selector_hex, &mut selector)
        .map_err(|e| InsightError::invalid_input(format!("invalid selector: {}", e)))?;

    Ok(CallData {
        selector: Selector::from(selector),
        args_hex,
    })
}
