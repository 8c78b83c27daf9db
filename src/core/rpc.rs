//! RPC dispatcher for requests sent to the plugin

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ConfirmPrompt, Host, HostRequest, InsightError};

/// A validated JSON-RPC request from a dapp
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Recognized methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcMethod {
    Hello,
    Unknown(String),
}

/// Parse a method name
pub fn parse_method(method: &str) -> RpcMethod {
    match method {
        "hello" => RpcMethod::Hello,
        other => RpcMethod::Unknown(other.to_string()),
    }
}

/// Greeting shown in the `hello` confirmation
pub fn greeting(origin: &str) -> String {
    format!("Hello, {}!", origin)
}

/// Handle a request coming from `origin`
pub async fn on_rpc_request(
    host: &dyn Host,
    origin: &str,
    request: &RpcRequest,
) -> Result<Value, InsightError> {
    debug!(origin, method = %request.method, "rpc request");
    match parse_method(&request.method) {
        RpcMethod::Hello => {
            let prompt = ConfirmPrompt {
                prompt: greeting(origin),
                description: "This custom confirmation is just for display purposes.".into(),
                text_area_content:
                    "But you can edit the snap source code to make it do something, if you want to!"
                        .into(),
            };
            host.request(HostRequest::Confirm([prompt])).await
        }
        RpcMethod::Unknown(method) => Err(InsightError::MethodNotFound { method }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EchoHost, ErrorKind};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        seen: Mutex<Vec<HostRequest>>,
    }

    #[async_trait]
    impl Host for RecordingHost {
        async fn request(&self, request: HostRequest) -> Result<Value, InsightError> {
            self.seen.lock().unwrap().push(request);
            Ok(Value::Bool(true))
        }
    }

    fn request(method: &str) -> RpcRequest {
        RpcRequest {
            method: method.to_string(),
            params: None,
        }
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("hello"), RpcMethod::Hello);
        assert_eq!(
            parse_method("Hello"),
            RpcMethod::Unknown("Hello".to_string())
        );
    }

    #[tokio::test]
    async fn test_hello_asks_host_for_confirmation() {
        let host = RecordingHost::default();
        let result = on_rpc_request(&host, "https://dapp.example", &request("hello"))
            .await
            .unwrap();
        assert_eq!(result, Value::Bool(true));

        let seen = host.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let HostRequest::Confirm([prompt]) = &seen[0];
        assert_eq!(prompt.prompt, "Hello, https://dapp.example!");
    }

    #[tokio::test]
    async fn test_hello_with_echo_host() {
        let result = on_rpc_request(&EchoHost, "localhost", &request("hello"))
            .await
            .unwrap();
        assert_eq!(result["method"], "snap_confirm");
        assert_eq!(result["params"][0]["prompt"], "Hello, localhost!");
    }

    #[tokio::test]
    async fn test_unknown_method_fails() {
        let err = on_rpc_request(&EchoHost, "localhost", &request("transfer"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MethodNotFoundError);
    }
}
