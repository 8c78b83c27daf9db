//! Remote signature resolution via the 4byte directory

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::core::InsightError;
use crate::domain::insight::SignatureRecord;

/// Public 4byte.directory signature endpoint
pub const FOUR_BYTE_API_ENDPOINT: &str = "https://www.4byte.directory/api/v1/signatures/";

/// 4byte API response body
#[derive(Debug, Deserialize)]
struct FourByteResponse {
    results: Vec<SignatureRecord>,
}

/// A source of candidate signatures for a selector
#[async_trait]
pub trait SignatureDirectory: Send + Sync {
    /// Every record the directory returns for `selector` (0x-prefixed hex).
    /// Records may not all match the selector exactly.
    async fn lookup(&self, selector: &str) -> Result<Vec<SignatureRecord>, InsightError>;
}

/// HTTP client for a 4byte-compatible signature directory
#[derive(Debug, Clone)]
pub struct FourByteDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl FourByteDirectory {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for FourByteDirectory {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), FOUR_BYTE_API_ENDPOINT)
    }
}

#[async_trait]
impl SignatureDirectory for FourByteDirectory {
    async fn lookup(&self, selector: &str) -> Result<Vec<SignatureRecord>, InsightError> {
        debug!(selector, url = %self.base_url, "querying signature directory");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("hex_signature", selector)])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| InsightError::UpstreamTransport {
                selector: selector.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::UpstreamStatus {
                selector: selector.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| InsightError::UpstreamTransport {
                selector: selector.to_string(),
                source,
            })?;

        let data: FourByteResponse =
            serde_json::from_slice(&body).map_err(|e| InsightError::UpstreamBody {
                selector: selector.to_string(),
                reason: e.to_string(),
            })?;

        debug!(selector, candidates = data.results.len(), "signature directory answered");
        Ok(data.results)
    }
}

/// Pick the record for `selector` among directory candidates.
///
/// Only exact `hex_signature` matches count. Among several, the most recently
/// created wins (largest `created_at`), then the largest `id`.
pub fn select_record(selector: &str, records: Vec<SignatureRecord>) -> Option<SignatureRecord> {
    records
        .into_iter()
        .filter(|record| record.hex_signature.eq_ignore_ascii_case(selector))
        .max_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        })
}

/// Look up `selector` and settle on a single signature
pub async fn resolve_signature(
    directory: &dyn SignatureDirectory,
    selector: &str,
) -> Result<SignatureRecord, InsightError> {
    let candidates = directory.lookup(selector).await?;
    select_record(selector, candidates).ok_or_else(|| InsightError::NotFound {
        selector: selector.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    fn record(id: u64, created_at: &str, text: &str, hex: &str) -> SignatureRecord {
        SignatureRecord {
            id,
            created_at: created_at.to_string(),
            text_signature: text.to_string(),
            hex_signature: hex.to_string(),
            bytes_signature: String::new(),
        }
    }

    struct FixedDirectory(Vec<SignatureRecord>);

    #[async_trait]
    impl SignatureDirectory for FixedDirectory {
        async fn lookup(&self, _selector: &str) -> Result<Vec<SignatureRecord>, InsightError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_newest_collision_wins() {
        let records = vec![
            record(1, "2018-05-11T08:39:29.708250Z", "transfer(address,uint256)", "0xa9059cbb"),
            record(2, "2021-09-01T00:00:00.000000Z", "many_msg_babbage(bytes1)", "0xa9059cbb"),
            record(3, "2019-01-01T00:00:00.000000Z", "other(uint8)", "0xa9059cbb"),
        ];
        let picked = select_record("0xa9059cbb", records).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn test_selection_is_order_independent() {
        let a = record(1, "2020-01-01T00:00:00Z", "a()", "0x11111111");
        let b = record(2, "2022-01-01T00:00:00Z", "b()", "0x11111111");
        let first = select_record("0x11111111", vec![a.clone(), b.clone()]).unwrap();
        let second = select_record("0x11111111", vec![b, a]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text_signature, "b()");
    }

    #[test]
    fn test_non_matching_records_are_ignored() {
        let records = vec![
            record(1, "2030-01-01T00:00:00Z", "prefix()", "0xa9059cbb00"),
            record(2, "2030-01-01T00:00:00Z", "other()", "0xdeadbeef"),
            record(3, "2016-01-01T00:00:00Z", "transfer(address,uint256)", "0xa9059cbb"),
        ];
        let picked = select_record("0xa9059cbb", records).unwrap();
        assert_eq!(picked.id, 3);
    }

    #[test]
    fn test_equal_timestamps_fall_back_to_id() {
        let records = vec![
            record(7, "2020-01-01T00:00:00Z", "x()", "0x12345678"),
            record(9, "2020-01-01T00:00:00Z", "y()", "0x12345678"),
        ];
        assert_eq!(select_record("0x12345678", records).unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let directory = FixedDirectory(vec![record(1, "2020", "x()", "0xdeadbeef")]);
        let err = resolve_signature(&directory, "0xa9059cbb").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFoundError);

        let empty = FixedDirectory(vec![]);
        let err = resolve_signature(&empty, "0xa9059cbb").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFoundError);
    }

    #[test]
    fn test_response_schema() {
        let body = r#"{"count":1,"next":null,"previous":null,"results":[{"id":145,"created_at":"2016-07-09T03:58:28.234977Z","text_signature":"transfer(address,uint256)","hex_signature":"0xa9059cbb","bytes_signature":"x"}]}"#;
        let data: FourByteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(data.results.len(), 1);

        assert!(serde_json::from_str::<FourByteResponse>(r#"{"count":0}"#).is_err());
        assert!(serde_json::from_str::<FourByteResponse>(r#"{"results":[{"id":"x"}]}"#).is_err());
    }
}
