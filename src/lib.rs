//! Transaction insights for pending contract calls.
//!
//! A pending transaction's call-data is split into its 4-byte selector, the
//! selector is resolved to a function signature through a public signature
//! directory, and the arguments are ABI-decoded into JSON-safe values.

pub mod config;
pub mod core;
pub mod domain;
pub mod harness;
pub mod infrastructure;
pub mod logging;
pub mod pipeline;

pub use crate::core::{on_rpc_request, EchoHost, ErrorKind, Host, InsightError, RpcRequest};
pub use crate::domain::insight::{InsightResponse, Transaction, TransactionInsightRequest};
pub use crate::infrastructure::registry::{FourByteDirectory, SignatureDirectory};
pub use crate::pipeline::InsightPipeline;
