pub mod context;
pub mod error;
pub mod rpc;

pub use context::{ConfirmPrompt, EchoHost, Host, HostRequest};
pub use error::{ErrorKind, ErrorReport, InsightError};
pub use rpc::{on_rpc_request, RpcRequest};
