//! Request and receipt models for push dispatch

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// A validated push-notification request.
///
/// Decoded from the inbound body, which is either a JSON object or a
/// JSON string holding a second, encoded JSON document (the shape
/// produced by callers that stringify the payload into a single field).
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRequest {
    /// Device registration token identifying the delivery target
    #[serde(default)]
    pub token: String,
    /// Notification title
    #[serde(default)]
    pub title: String,
    /// Notification body
    #[serde(default)]
    pub body: String,
    /// Custom key/value payload delivered alongside the notification
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl NotificationRequest {
    /// Decode and validate a raw request body.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() {
            return Err(AppError::InvalidPayload("empty request body".to_string()));
        }

        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| AppError::InvalidPayload(e.to_string()))?;

        // A top-level string is the double-encoded shape
        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner)
                .map_err(|e| AppError::InvalidPayload(e.to_string()))?,
            other => other,
        };

        let request: NotificationRequest = serde_json::from_value(value)
            .map_err(|e| AppError::InvalidPayload(e.to_string()))?;

        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        Ok(request)
    }

    /// Names of required fields that are absent or empty. All three are
    /// checked before the caller fails, so the error reports the full set.
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.token.is_empty() {
            missing.push("token");
        }
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.body.is_empty() {
            missing.push("body");
        }
        missing
    }
}

/// Successful dispatch outcome, serialized as the response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReceipt {
    pub success: bool,
    pub message: String,
    /// Provider-assigned message identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl DispatchReceipt {
    pub fn sent(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Push notification sent successfully".to_string(),
            message_id: Some(message_id.into()),
        }
    }
}
