use std::collections::HashMap;

use serde::Serialize;

use crate::config::WebPushConfig;

use super::BackgroundPushPayload;

/// Title shown when the payload carries no notification block
pub const DEFAULT_TITLE: &str = "Background Message";
/// De-duplication tag used when the payload data has no `type`
pub const DEFAULT_TAG: &str = "default";
pub const OPEN_ACTION: &str = "open";

const DEFAULT_ICON: &str = "/icons/Icon-192.png";

/// Icon and badge paths embedded in displayed notifications.
#[derive(Debug, Clone)]
pub struct DisplayAssets {
    pub icon: String,
    pub badge: String,
}

impl Default for DisplayAssets {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_ICON.to_string(),
        }
    }
}

impl From<&WebPushConfig> for DisplayAssets {
    fn from(web: &WebPushConfig) -> Self {
        Self {
            icon: web.icon.clone(),
            badge: web.badge.clone(),
        }
    }
}

/// One OS-level notification, as handed to the host's display API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationDisplay {
    pub title: String,
    pub options: DisplayOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub data: HashMap<String, String>,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// Map a background push payload to the notification the worker displays.
/// Title and body fall back to fixed defaults; `data.type` becomes the
/// de-duplication tag.
pub fn render_notification(
    payload: &BackgroundPushPayload,
    assets: &DisplayAssets,
) -> NotificationDisplay {
    let notification = payload.notification.as_ref();
    let data = payload.data.clone().unwrap_or_default();
    let tag = data
        .get("type")
        .cloned()
        .unwrap_or_else(|| DEFAULT_TAG.to_string());

    NotificationDisplay {
        title: notification
            .and_then(|n| n.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        options: DisplayOptions {
            body: notification.and_then(|n| n.body.clone()).unwrap_or_default(),
            icon: assets.icon.clone(),
            badge: assets.badge.clone(),
            tag,
            data,
            require_interaction: true,
            actions: vec![NotificationAction {
                action: OPEN_ACTION.to_string(),
                title: "Open".to_string(),
            }],
        },
    }
}
