//! Signature directory records

use serde::{Deserialize, Serialize};

/// A function signature entry from the public signature directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub id: u64,
    /// Creation timestamp, ISO-8601 (e.g. "2018-05-11T08:39:29.708250Z")
    pub created_at: String,
    /// Human-readable signature (e.g. "transfer(address,uint256)")
    pub text_signature: String,
    /// Selector hex with 0x prefix
    pub hex_signature: String,
    pub bytes_signature: String,
}

impl SignatureRecord {
    /// Function name without the parameter list
    pub fn function_name(&self) -> &str {
        self.text_signature
            .split('(')
            .next()
            .unwrap_or(&self.text_signature)
    }
}
