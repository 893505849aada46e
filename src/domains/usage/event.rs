//! Usage events - one immutable record per processed invocation.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Record of a completed `process` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub tool_id: String,
    /// Creation time, epoch milliseconds.
    pub timestamp_ms: i64,
    pub success: bool,
    pub processing_time_ms: u64,
    /// Free-form caller context such as a user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_context: Option<String>,
}

impl UsageEvent {
    /// Create an event stamped with the current time.
    pub fn now(tool_id: impl Into<String>, success: bool, processing_time_ms: u64) -> Self {
        Self::at(Utc::now().timestamp_millis(), tool_id, success, processing_time_ms)
    }

    /// Create an event with an explicit timestamp.
    pub fn at(
        timestamp_ms: i64,
        tool_id: impl Into<String>,
        success: bool,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            timestamp_ms,
            success,
            processing_time_ms,
            client_context: None,
        }
    }

    /// Attach caller context.
    pub fn with_client_context(mut self, context: Option<String>) -> Self {
        self.client_context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let event = UsageEvent::at(1_700_000_000_000, "json-formatter", true, 4);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "toolId": "json-formatter",
                "timestampMs": 1_700_000_000_000i64,
                "success": true,
                "processingTimeMs": 4
            })
        );
    }

    #[test]
    fn test_client_context_round_trips() {
        let event = UsageEvent::at(1, "x", false, 0).with_client_context(Some("curl/8".into()));
        let text = serde_json::to_string(&event).unwrap();
        assert!(text.contains("\"clientContext\":\"curl/8\""));
        let back: UsageEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_now_is_recent() {
        let before = Utc::now().timestamp_millis();
        let event = UsageEvent::now("x", true, 0);
        assert!(event.timestamp_ms >= before);
    }
}
