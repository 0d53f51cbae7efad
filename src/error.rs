//! Error types for the bridge

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error payload delivered on the bridge's error channel
///
/// `error` is the only field the contract promises. Hosts attach extra
/// keys on some failures (`type` and `id` on device lookup, `granted`
/// on permission denials); those are preserved verbatim in `details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}

impl ErrorResult {
    /// An error carrying only a message
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            details: serde_json::Map::new(),
        }
    }

    /// Lenient decode of whatever the host put on the error channel
    ///
    /// Some hosts send a bare message string, others an object with an
    /// `error` key; denied permission requests arrive with no message
    /// at all. Every shape decodes without losing data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(s) => Self::message(s),
            other => serde_json::from_value(other.clone()).unwrap_or_else(|_| Self {
                error: Some(other.to_string()),
                details: serde_json::Map::new(),
            }),
        }
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(msg) => f.write_str(msg),
            None => f.write_str("unspecified native error"),
        }
    }
}

/// Bridge error type
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The native handler invoked the error channel
    #[error("native error: {0}")]
    Native(ErrorResult),

    /// Request encoding or response decoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Wire method name outside the fixed operation set
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

impl BridgeError {
    /// The free-text message from the native side, when one was given
    ///
    /// The contract defines no error codes; string inspection is the
    /// only classification available to callers.
    pub fn native_message(&self) -> Option<&str> {
        match self {
            Self::Native(result) => result.error.as_deref(),
            _ => None,
        }
    }
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_string() {
        let err = ErrorResult::from_value(json!("Device not enabled Bluetooth!"));
        assert_eq!(err.error.as_deref(), Some("Device not enabled Bluetooth!"));
        assert!(err.details.is_empty());
    }

    #[test]
    fn test_from_value_object_with_context() {
        let err = ErrorResult::from_value(json!({
            "error": "Device not found or not connected!",
            "type": "bluetooth",
            "id": "00:11:22:33:44:55"
        }));
        assert_eq!(err.error.as_deref(), Some("Device not found or not connected!"));
        assert_eq!(err.details.get("type"), Some(&json!("bluetooth")));
    }

    #[test]
    fn test_from_value_permission_denial() {
        // Denied permission requests arrive without any message
        let err = ErrorResult::from_value(json!({ "granted": false }));
        assert!(err.error.is_none());
        assert_eq!(err.details.get("granted"), Some(&json!(false)));
    }

    #[test]
    fn test_from_value_null() {
        let err = ErrorResult::from_value(Value::Null);
        assert_eq!(err, ErrorResult::default());
        assert_eq!(err.to_string(), "unspecified native error");
    }

    #[test]
    fn test_native_message_accessor() {
        let err = BridgeError::Native(ErrorResult::message("printer offline"));
        assert_eq!(err.native_message(), Some("printer offline"));
        assert_eq!(err.to_string(), "native error: printer offline");
    }
}
