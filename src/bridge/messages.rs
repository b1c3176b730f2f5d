//! Wire protocol with the host.
//!
//! Everything crossing the channel is a tagged JSON object. Inbound traffic
//! is best-effort: anything that doesn't parse as a known message is dropped
//! without comment, since the host broadcasts snapshots for contexts this
//! tracker doesn't care about.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages the host sends us.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    Data { data: SnapshotPayload },
    #[serde(other)]
    Unknown,
}

/// One observation of game state. Only the well-known fields are named;
/// per-job XP values stay in the flattened map keyed by remote field name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotPayload {
    pub job_name: Option<String>,
    pub job: Option<String>,
    pub name: Option<String>,
    /// Inventory blob, either inline JSON or a JSON-encoded string.
    pub inventory: Option<Value>,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl SnapshotPayload {
    /// The XP value for a job's remote field, if present and numeric.
    pub fn exp_value(&self, remote_key: &str) -> Option<f64> {
        self.fields.get(remote_key).and_then(Value::as_f64)
    }
}

/// Decode an inventory value into its token map. Returns `None` when the
/// payload is neither an object nor a string holding one.
pub fn parse_inventory(value: &Value) -> Option<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// Pull a token's numeric `amount` out of a parsed inventory.
pub fn token_amount(inventory: &serde_json::Map<String, Value>, token_id: &str) -> Option<f64> {
    inventory.get(token_id)?.get("amount")?.as_f64()
}

/// Messages we send to the host. Fire-and-forget; no reply is correlated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TrackerMessage {
    GetNamedData { keys: Vec<String> },
    GetData,
    Notification { text: String },
    Pin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_message_parses_with_flattened_exp_fields() {
        let raw = json!({
            "type": "data",
            "data": {
                "job_name": "Trucker",
                "name": "Ana",
                "exp_trucking_trucking": 1234.0,
                "exp_farming_mining": 9
            }
        });
        let msg: HostMessage = serde_json::from_value(raw).unwrap();
        let HostMessage::Data { data } = msg else {
            panic!("expected data message");
        };
        assert_eq!(data.job_name.as_deref(), Some("Trucker"));
        assert_eq!(data.exp_value("exp_trucking_trucking"), Some(1234.0));
        assert_eq!(data.exp_value("exp_farming_mining"), Some(9.0));
        assert_eq!(data.exp_value("exp_ems_ems"), None);
    }

    #[test]
    fn non_numeric_exp_fields_read_as_absent() {
        let raw = json!({ "type": "data", "data": { "exp_ems_ems": "lots" } });
        let HostMessage::Data { data } = serde_json::from_value(raw).unwrap() else {
            panic!("expected data message");
        };
        assert_eq!(data.exp_value("exp_ems_ems"), None);
    }

    #[test]
    fn unrecognized_types_map_to_unknown() {
        let msg: HostMessage = serde_json::from_value(json!({ "type": "ping" })).unwrap();
        assert!(matches!(msg, HostMessage::Unknown));
    }

    #[test]
    fn inventory_accepts_object_or_encoded_string() {
        let object = json!({ "exp_token_a|trucking|trucking": { "amount": 7000 } });
        let parsed = parse_inventory(&object).unwrap();
        assert_eq!(token_amount(&parsed, "exp_token_a|trucking|trucking"), Some(7000.0));

        let encoded = Value::String(object.to_string());
        let parsed = parse_inventory(&encoded).unwrap();
        assert_eq!(token_amount(&parsed, "exp_token_a|trucking|trucking"), Some(7000.0));

        assert!(parse_inventory(&Value::String("not json".into())).is_none());
        assert!(parse_inventory(&json!(42)).is_none());
    }

    #[test]
    fn token_amount_requires_a_number() {
        let parsed = parse_inventory(&json!({ "tok": { "amount": "7000" } })).unwrap();
        assert_eq!(token_amount(&parsed, "tok"), None);
        let parsed = parse_inventory(&json!({ "tok": {} })).unwrap();
        assert_eq!(token_amount(&parsed, "tok"), None);
    }

    #[test]
    fn outbound_messages_serialize_with_expected_tags() {
        let named = TrackerMessage::GetNamedData { keys: vec!["inventory".into()] };
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            json!({ "type": "getNamedData", "keys": ["inventory"] })
        );
        assert_eq!(
            serde_json::to_value(&TrackerMessage::GetData).unwrap(),
            json!({ "type": "getData" })
        );
        assert_eq!(
            serde_json::to_value(&TrackerMessage::Pin).unwrap(),
            json!({ "type": "pin" })
        );
    }
}
