//! Transactions handed over by the host and the insight handed back

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DecodedValue, SignatureRecord};

/// A pending transaction as supplied by the host.
///
/// Only `data` is interpreted; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Transaction {
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            fields: Map::new(),
        }
    }
}

/// Arguments of the transaction-insight hook
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInsightRequest {
    #[serde(default)]
    pub transaction: Option<Transaction>,
    #[serde(default)]
    pub chain_id: Option<String>,
}

impl TransactionInsightRequest {
    pub fn new(transaction: Transaction, chain_id: impl Into<String>) -> Self {
        Self {
            transaction: Some(transaction),
            chain_id: Some(chain_id.into()),
        }
    }
}

/// Resolved signature plus its decoded parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    #[serde(flatten)]
    pub signature: SignatureRecord,
    pub parameters: Vec<DecodedValue>,
    /// Set when argument decoding failed and `parameters` was left empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub transaction: Transaction,
    pub chain_id: String,
    pub transaction_data: TransactionData,
}

/// Hook result returned to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResponse {
    pub insights: Insight,
}
