//! Transaction insight data model

mod record;
mod transaction;
mod value;

pub use record::SignatureRecord;
pub use transaction::{
    Insight, InsightResponse, Transaction, TransactionData, TransactionInsightRequest,
};
pub use value::DecodedValue;
