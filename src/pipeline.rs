//! Transaction insight pipeline
//!
//! One pass per request: validate the hook arguments, split off the selector,
//! resolve it through the signature directory, decode and normalize the
//! arguments. Nothing is cached or shared between runs.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::InsightError;
use crate::domain::insight::{
    Insight, InsightResponse, Transaction, TransactionData, TransactionInsightRequest,
};
use crate::infrastructure::abi::{
    decode_arguments, extract_selector, normalize_all, DecodedArguments,
};
use crate::infrastructure::registry::{resolve_signature, SignatureDirectory};

/// Pipeline stages, in execution order.
///
/// Any stage may move to `Failed`; the reason is the `InsightError` returned
/// from [`InsightPipeline::on_transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Extracting,
    Resolving,
    Decoding,
    Normalizing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Extracting => "extracting",
            Stage::Resolving => "resolving",
            Stage::Decoding => "decoding",
            Stage::Normalizing => "normalizing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs insight requests against a signature directory
#[derive(Clone)]
pub struct InsightPipeline {
    directory: Arc<dyn SignatureDirectory>,
}

impl InsightPipeline {
    pub fn new(directory: Arc<dyn SignatureDirectory>) -> Self {
        Self { directory }
    }

    /// Handle the transaction-insight hook
    pub async fn on_transaction(
        &self,
        request: TransactionInsightRequest,
    ) -> Result<InsightResponse, InsightError> {
        let mut stage = Stage::Validating;
        let result = self.run(request, &mut stage).await;
        match &result {
            Ok(_) => debug!(%stage, "insight ready"),
            Err(err) => {
                let failed_in = stage;
                advance(&mut stage, Stage::Failed);
                warn!(stage = %failed_in, error = %err, "insight failed");
            }
        }
        result
    }

    async fn run(
        &self,
        request: TransactionInsightRequest,
        stage: &mut Stage,
    ) -> Result<InsightResponse, InsightError> {
        let chain_id = request.chain_id.filter(|id| !id.is_empty());
        let (transaction, chain_id) = match (request.transaction, chain_id) {
            (Some(transaction), Some(chain_id)) => (transaction, chain_id),
            _ => {
                return Err(InsightError::invalid_input(
                    "transaction or chainId cant be null",
                ))
            }
        };

        advance(stage, Stage::Extracting);
        let data = transaction.data.as_deref().ok_or_else(|| {
            InsightError::invalid_input("transaction data is not a valid hex string")
        })?;
        let call = extract_selector(data)?;
        let selector = call.selector_hex();

        advance(stage, Stage::Resolving);
        let signature = resolve_signature(self.directory.as_ref(), &selector).await?;
        debug!(%selector, signature = %signature.text_signature, "selector resolved");

        advance(stage, Stage::Decoding);
        let (values, decode_error) = match decode_arguments(&signature.text_signature, &call) {
            Ok(decoded) => {
                check_arity(&signature.text_signature, &decoded)?;
                (decoded.values, None)
            }
            Err(err) => {
                warn!(
                    %selector,
                    signature = %signature.text_signature,
                    error = %err,
                    "argument decoding failed, continuing without parameters"
                );
                (Vec::new(), Some(err.to_string()))
            }
        };

        advance(stage, Stage::Normalizing);
        let parameters = normalize_all(values);

        advance(stage, Stage::Done);
        Ok(insight(
            transaction,
            chain_id,
            TransactionData {
                signature,
                parameters,
                decode_error,
            },
        ))
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "pipeline stage");
    *stage = next;
}

/// Every parsed parameter type must have exactly one decoded value
fn check_arity(signature: &str, decoded: &DecodedArguments) -> Result<(), InsightError> {
    if decoded.types.len() != decoded.values.len() {
        return Err(InsightError::Mismatch {
            signature: signature.to_string(),
            types: decoded.types.len(),
            values: decoded.values.len(),
        });
    }
    Ok(())
}

fn insight(
    transaction: Transaction,
    chain_id: String,
    transaction_data: TransactionData,
) -> InsightResponse {
    InsightResponse {
        insights: Insight {
            transaction,
            chain_id,
            transaction_data,
        },
    }
}
