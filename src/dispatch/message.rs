//! FCM v1 message envelope
//!
//! The envelope is a pure function of the validated request plus static
//! configuration. Field names serialize in the admin-SDK casing, which
//! the FCM v1 REST endpoint accepts.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::AndroidConfig;

use super::NotificationRequest;

const ANDROID_PRIORITY_HIGH: &str = "high";
const DEFAULT_SOUND: &str = "default";
/// APNs header value requesting immediate delivery
const APNS_PRIORITY_IMMEDIATE: &str = "10";
const APNS_BADGE: u32 = 1;

/// Provider message envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub token: String,
    pub notification: Notification,
    pub data: HashMap<String, String>,
    pub android: AndroidMessage,
    pub apns: ApnsMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AndroidMessage {
    pub priority: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidNotification {
    pub channel_id: String,
    pub priority: String,
    pub sound: String,
    pub click_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApnsMessage {
    pub headers: ApnsHeaders,
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApnsHeaders {
    #[serde(rename = "apns-priority")]
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aps {
    pub sound: String,
    pub badge: u32,
    /// Wakes the app for background data processing
    #[serde(rename = "content-available")]
    pub content_available: u32,
}

impl Message {
    /// Build the envelope for a request. The token, title, body, and data
    /// are carried verbatim; everything else is a fixed delivery hint.
    pub fn from_request(request: &NotificationRequest, android: &AndroidConfig) -> Self {
        Self {
            token: request.token.clone(),
            notification: Notification {
                title: request.title.clone(),
                body: request.body.clone(),
            },
            data: request.data.clone(),
            android: AndroidMessage {
                priority: ANDROID_PRIORITY_HIGH.to_string(),
                notification: AndroidNotification {
                    channel_id: android.channel_id.clone(),
                    priority: ANDROID_PRIORITY_HIGH.to_string(),
                    sound: DEFAULT_SOUND.to_string(),
                    click_action: android.click_action.clone(),
                },
            },
            apns: ApnsMessage {
                headers: ApnsHeaders {
                    priority: APNS_PRIORITY_IMMEDIATE.to_string(),
                },
                payload: ApnsPayload {
                    aps: Aps {
                        sound: DEFAULT_SOUND.to_string(),
                        badge: APNS_BADGE,
                        content_available: 1,
                    },
                },
            },
        }
    }
}
