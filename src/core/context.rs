//! Host capability injected into the dispatcher

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::InsightError;

/// Parameters of a host confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPrompt {
    pub prompt: String,
    pub description: String,
    pub text_area_content: String,
}

/// Requests the plugin can make of its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum HostRequest {
    /// Show a confirmation dialog to the user
    #[serde(rename = "snap_confirm")]
    Confirm([ConfirmPrompt; 1]),
}

/// The host runtime as seen by the plugin.
///
/// Passed explicitly to every handler; nothing in the crate reaches for an
/// ambient host object.
#[async_trait]
pub trait Host: Send + Sync {
    async fn request(&self, request: HostRequest) -> Result<Value, InsightError>;
}

/// Host without a UI: answers each request with the directive it was given
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHost;

#[async_trait]
impl Host for EchoHost {
    async fn request(&self, request: HostRequest) -> Result<Value, InsightError> {
        serde_json::to_value(&request).map_err(|e| InsightError::Host(e.to_string()))
    }
}
