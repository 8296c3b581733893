use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestingOrder {
    pub oid: u64,
    #[serde(default)]
    pub cloid: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilledOrder {
    pub total_sz: String,
    pub avg_px: String,
    pub oid: u64,
    #[serde(default)]
    pub cloid: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TwapRunning {
    pub twap_id: u64,
}

/// Per-item outcome inside `response.data.statuses`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ExchangeDataStatus {
    Success,
    WaitingForFill,
    WaitingForTrigger,
    Error(String),
    Resting(RestingOrder),
    Filled(FilledOrder),
    Running(TwapRunning),
}

/// The `response` object of an accepted exchange call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ExchangeResponse {
    #[serde(rename = "type", default)]
    pub response_type: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ExchangeResponse {
    /// Decoded `data.statuses`; entries of an unknown shape are skipped.
    pub fn statuses(&self) -> Vec<ExchangeDataStatus> {
        self.data
            .as_ref()
            .and_then(|d| d.get("statuses"))
            .and_then(Value::as_array)
            .map(|statuses| {
                statuses
                    .iter()
                    .filter_map(|s| serde_json::from_value(s.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Order ids of resting and filled orders, in status order.
    pub fn oids(&self) -> Vec<u64> {
        self.statuses()
            .iter()
            .filter_map(|status| match status {
                ExchangeDataStatus::Resting(order) => Some(order.oid),
                ExchangeDataStatus::Filled(order) => Some(order.oid),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.statuses()
            .into_iter()
            .filter_map(|status| match status {
                ExchangeDataStatus::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Id of a TWAP that was started by this call.
    pub fn twap_id(&self) -> Option<u64> {
        self.data
            .as_ref()
            .and_then(|d| d.pointer("/status/running/twapId"))
            .and_then(Value::as_u64)
            .or_else(|| {
                self.statuses().into_iter().find_map(|status| match status {
                    ExchangeDataStatus::Running(running) => Some(running.twap_id),
                    _ => None,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_statuses_mixed() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "type": "order",
            "data": {"statuses": [
                {"resting": {"oid": 7}},
                {"filled": {"totalSz": "0.02", "avgPx": "1891.4", "oid": 8}},
                "waitingForTrigger",
                {"error": "Order must have minimum value of $10."}
            ]}
        }))
        .unwrap();
        assert_eq!(response.oids(), vec![7, 8]);
        assert_eq!(response.statuses()[2], ExchangeDataStatus::WaitingForTrigger);
        assert_eq!(response.errors(), vec!["Order must have minimum value of $10."]);
    }

    #[test]
    fn test_default_response_without_data() {
        let response: ExchangeResponse = serde_json::from_value(json!({"type": "default"})).unwrap();
        assert!(response.statuses().is_empty());
        assert!(response.oids().is_empty());
    }

    #[test]
    fn test_twap_id() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "type": "twapOrder",
            "data": {"status": {"running": {"twapId": 77738308}}}
        }))
        .unwrap();
        assert_eq!(response.twap_id(), Some(77738308));
    }
}
