//! Line-delimited JSON host harness
//!
//! Stands in for the host runtime: each input line invokes one hook, each
//! reply is written as one line once its request completes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::core::{on_rpc_request, ErrorReport, Host, InsightError, RpcRequest};
use crate::domain::insight::TransactionInsightRequest;
use crate::pipeline::InsightPipeline;

/// A hook invocation from the host
#[derive(Debug, Deserialize)]
#[serde(tag = "hook", rename_all = "lowercase")]
pub enum HookCall {
    Rpc { origin: String, request: RpcRequest },
    Transaction(TransactionInsightRequest),
}

#[derive(Debug, Serialize)]
struct Reply {
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

impl Reply {
    fn from_result(id: Value, result: Result<Value, InsightError>) -> Self {
        match result {
            Ok(value) => Self {
                id,
                result: Some(value),
                error: None,
            },
            Err(err) => Self {
                id,
                result: None,
                error: Some(ErrorReport::from(&err)),
            },
        }
    }
}

/// Dispatch one hook call
pub async fn dispatch(
    host: &dyn Host,
    pipeline: &InsightPipeline,
    call: HookCall,
) -> Result<Value, InsightError> {
    match call {
        HookCall::Rpc { origin, request } => on_rpc_request(host, &origin, &request).await,
        HookCall::Transaction(request) => {
            let response = pipeline.on_transaction(request).await?;
            serde_json::to_value(response).map_err(|e| InsightError::Host(e.to_string()))
        }
    }
}

/// Handle one input line and render its reply line
pub async fn handle_line(
    host: &dyn Host,
    pipeline: &InsightPipeline,
    line: &str,
) -> Result<String, serde_json::Error> {
    let (id, result) = match serde_json::from_str::<Value>(line) {
        Ok(mut raw) => {
            let id = raw
                .as_object_mut()
                .and_then(|obj| obj.remove("id"))
                .unwrap_or(Value::Null);
            let result = match serde_json::from_value::<HookCall>(raw) {
                Ok(call) => dispatch(host, pipeline, call).await,
                Err(e) => Err(InsightError::invalid_input(format!("invalid hook call: {e}"))),
            };
            (id, result)
        }
        Err(e) => (
            Value::Null,
            Err(InsightError::invalid_input(format!("invalid JSON: {}", e))),
        ),
    };
    serde_json::to_string(&Reply::from_result(id, result))
}

/// Handle one raw input line; bytes that are not UTF-8 get an error reply
pub async fn handle_raw_line(
    host: &dyn Host,
    pipeline: &InsightPipeline,
    raw: &[u8],
) -> Result<String, serde_json::Error> {
    match std::str::from_utf8(raw) {
        Ok(line) => handle_line(host, pipeline, line).await,
        Err(e) => {
            let err = InsightError::invalid_input(format!("invalid UTF-8 in request line: {e}"));
            serde_json::to_string(&Reply::from_result(Value::Null, Err(err)))
        }
    }
}

/// Serve hook calls from `reader` until it closes, writing replies to `writer`.
///
/// Every line runs as its own task; replies come back in completion order.
/// A read error stops intake, but replies already in flight are still written
/// before the error is returned.
pub async fn serve<R, W>(
    reader: R,
    mut writer: W,
    host: Arc<dyn Host>,
    pipeline: InsightPipeline,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    let mut reply_tx = Some(reply_tx);
    let mut reader = reader;
    let mut buf = Vec::new();
    let mut read_error = None;

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf), if reply_tx.is_some() => {
                match read {
                    Ok(0) => {
                        debug!("input closed, draining pending replies");
                        reply_tx = None;
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "failed to read input, draining pending replies");
                        read_error = Some(e);
                        reply_tx = None;
                        continue;
                    }
                }
                let raw = std::mem::take(&mut buf);
                if raw.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                let Some(tx) = reply_tx.clone() else { continue };
                let host = Arc::clone(&host);
                let pipeline = pipeline.clone();
                tokio::spawn(async move {
                    let line = raw.strip_suffix(b"\n").unwrap_or(&raw[..]);
                    let line = line.strip_suffix(b"\r").unwrap_or(line);
                    match handle_raw_line(host.as_ref(), &pipeline, line).await {
                        Ok(reply) => {
                            let _ = tx.send(reply);
                        }
                        Err(e) => error!(error = %e, "failed to render reply"),
                    }
                });
            }
            Some(reply) = reply_rx.recv() => {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            else => break,
        }
    }

    match read_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
