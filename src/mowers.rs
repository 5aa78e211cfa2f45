//! Mower listing and detail lookup for the Automower Connect API.
//!
//! - [`list_mowers`] — `GET /mowers`, every mower registered on the account.
//! - [`get_mower_detail`] — `GET /mowers/{id}`, one mower's full record.
//!
//! Both responses are JSON:API documents. Only the `id` of each listed
//! mower is interpreted; everything else (`type`, `attributes`, ...) is
//! carried through untouched.
//!
//! The two calls treat HTTP failures differently. A failed listing aborts
//! the run with `AmcError::Listing`, since there is nothing to export
//! without it. A failed detail fetch is recorded as
//! [`DeviceDetail::Failed`] so one broken mower does not hide the others.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::AmcClient;
use crate::error::{AmcError, Result};

/// One element of the listing's `data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Mower identifier used to address the detail endpoint. Kept as raw
    /// JSON so a malformed id only affects its own entry.
    #[serde(default)]
    pub id: Option<Value>,

    /// All other fields, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceSummary {
    /// The identifier, if it is a non-empty string.
    pub fn mower_id(&self) -> Option<&str> {
        self.id
            .as_ref()
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// JSON:API envelope of the listing response. A missing or `null` `data`
/// means no mowers.
#[derive(Debug, Deserialize)]
pub struct MowerList {
    /// Listed mowers, in API order.
    #[serde(default)]
    pub data: Option<Vec<DeviceSummary>>,
}

/// Outcome of a detail fetch, serialized as-is into the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceDetail {
    /// The 200 response body, verbatim.
    Fetched(Value),
    /// Any other status: `{"error": <status>, "body": <raw text>}`.
    Failed {
        /// HTTP status code.
        error: u16,
        /// Raw response body.
        body: String,
    },
}

impl DeviceDetail {
    /// `true` for a captured HTTP failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, DeviceDetail::Failed { .. })
    }
}

/// Retrieves the mowers registered on the authenticated account, in the
/// order the API returns them.
///
/// # Errors
///
/// - `AmcError::Listing` — any status other than 200.
/// - `AmcError::Parse` — a 200 body that is not a JSON object.
/// - `AmcError::Network` — transport failure or timeout.
pub async fn list_mowers(client: &AmcClient) -> Result<Vec<DeviceSummary>> {
    let url = client.endpoints().mowers_url();
    let resp = client.get(&url).await?;
    if !resp.is_ok() {
        return Err(AmcError::Listing {
            status: resp.status,
            body: resp.body,
        });
    }

    let list: MowerList = serde_json::from_str(&resp.body)?;
    let mowers = list.data.unwrap_or_default();
    tracing::info!(count = mowers.len(), "listed mowers");
    Ok(mowers)
}

/// Retrieves one mower's detail record.
///
/// A non-200 status is not an error: it comes back as
/// [`DeviceDetail::Failed`] carrying the status and raw body.
///
/// # Errors
///
/// - `AmcError::Parse` — a 200 body that is not valid JSON.
/// - `AmcError::Network` — transport failure or timeout. These abort the
///   run like they do for every other call.
pub async fn get_mower_detail(client: &AmcClient, mower_id: &str) -> Result<DeviceDetail> {
    let url = client.endpoints().mower_url(mower_id);
    let resp = client.get(&url).await?;
    if !resp.is_ok() {
        tracing::warn!(
            mower_id,
            status = resp.status.as_u16(),
            "mower detail request failed"
        );
        return Ok(DeviceDetail::Failed {
            error: resp.status.as_u16(),
            body: resp.body,
        });
    }

    Ok(DeviceDetail::Fetched(serde_json::from_str(&resp.body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mower_list_deserializes_json_api_document() {
        let json = r#"{
            "data": [
                {
                    "type": "mower",
                    "id": "c8d0a4e2-1f7e-4b6a-9d1e-000000000001",
                    "attributes": {
                        "system": {"name": "Front lawn", "model": "315X"},
                        "battery": {"batteryPercent": 87}
                    }
                },
                {"type": "mower", "id": "c8d0a4e2-1f7e-4b6a-9d1e-000000000002"}
            ]
        }"#;
        let list: MowerList = serde_json::from_str(json).unwrap();
        let data = list.data.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(
            data[0].mower_id(),
            Some("c8d0a4e2-1f7e-4b6a-9d1e-000000000001")
        );
        assert_eq!(data[0].extra["type"], "mower");
        assert_eq!(
            data[0].extra["attributes"]["system"]["model"],
            json!("315X")
        );
    }

    #[test]
    fn mower_list_without_data_is_none() {
        let list: MowerList = serde_json::from_str(r#"{"meta": {}}"#).unwrap();
        assert!(list.data.is_none());
        let list: MowerList = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(list.data.is_none());
    }

    #[test]
    fn summary_without_usable_id_has_no_mower_id() {
        let missing: DeviceSummary = serde_json::from_str(r#"{"type": "mower"}"#).unwrap();
        let empty: DeviceSummary = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        let numeric: DeviceSummary = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(missing.mower_id(), None);
        assert_eq!(empty.mower_id(), None);
        assert_eq!(numeric.mower_id(), None);
    }

    #[test]
    fn malformed_id_does_not_fail_the_listing() {
        let json = r#"{"data": [{"id": "M1"}, {"id": 42}, {"id": {"nested": true}}]}"#;
        let list: MowerList = serde_json::from_str(json).unwrap();
        let data = list.data.unwrap();
        let ids: Vec<_> = data.iter().map(|m| m.mower_id()).collect();
        assert_eq!(ids, vec![Some("M1"), None, None]);
    }

    #[test]
    fn summary_round_trips_extra_fields() {
        let raw = json!({"id": "M1", "type": "mower", "attributes": {"x": 1}});
        let summary: DeviceSummary = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&summary).unwrap(), raw);
    }

    #[test]
    fn fetched_detail_serializes_transparently() {
        let detail = DeviceDetail::Fetched(json!({"data": {"id": "M1"}}));
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({"data": {"id": "M1"}})
        );
        assert!(!detail.is_failed());
    }

    #[test]
    fn failed_detail_serializes_as_error_record() {
        let detail = DeviceDetail::Failed {
            error: 404,
            body: "not found".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({"error": 404, "body": "not found"})
        );
        assert!(detail.is_failed());
    }
}
