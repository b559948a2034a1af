//! Provider-delivered push payload, as seen by the service worker.

use std::collections::HashMap;

use serde::Deserialize;

/// Payload of a background push event. Externally supplied; never
/// mutated beyond producing display options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackgroundPushPayload {
    #[serde(default)]
    pub notification: Option<PushNotification>,
    #[serde(default)]
    pub data: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushNotification {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}
