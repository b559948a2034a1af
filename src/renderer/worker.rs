//! Generation of the firebase-messaging service worker script.

use serde_json::Value;

use crate::config::WebPushConfig;

use super::{DEFAULT_TAG, DEFAULT_TITLE, OPEN_ACTION};

fn js_string(s: &str) -> String {
    Value::from(s).to_string()
}

/// Render the worker script served at `/firebase-messaging-sw.js`. The
/// display defaults mirror `render_notification` exactly.
pub fn render_worker_script(web: &WebPushConfig) -> String {
    let firebase_config = serde_json::json!({
        "apiKey": web.api_key,
        "authDomain": web.auth_domain,
        "projectId": web.project_id,
        "storageBucket": web.storage_bucket,
        "messagingSenderId": web.messaging_sender_id,
        "appId": web.app_id,
    });

    format!(
        r#"importScripts("https://www.gstatic.com/firebasejs/8.10.1/firebase-app.js");
importScripts("https://www.gstatic.com/firebasejs/8.10.1/firebase-messaging.js");

firebase.initializeApp({config});

const messaging = firebase.messaging();

// Handle background messages
messaging.setBackgroundMessageHandler(function(payload) {{
    const notification = payload.notification || {{}};
    const notificationTitle = notification.title || {title};
    const notificationOptions = {{
        body: notification.body || '',
        icon: {icon},
        badge: {badge},
        tag: (payload.data && payload.data.type) || {tag},
        data: payload.data || {{}},
        requireInteraction: true,
        actions: [
            {{
                action: {action},
                title: 'Open'
            }}
        ]
    }};

    return self.registration.showNotification(notificationTitle, notificationOptions);
}});
"#,
        config = firebase_config,
        title = js_string(DEFAULT_TITLE),
        icon = js_string(&web.icon),
        badge = js_string(&web.badge),
        tag = js_string(DEFAULT_TAG),
        action = js_string(OPEN_ACTION),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_config() -> WebPushConfig {
        serde_json::from_value(serde_json::json!({
            "api_key": "k",
            "auth_domain": "tea-serve.firebaseapp.com",
            "project_id": "tea-serve",
            "storage_bucket": "tea-serve.appspot.com",
            "messaging_sender_id": "123",
            "app_id": "1:123:web:abc"
        }))
        .unwrap()
    }

    #[test]
    fn test_script_embeds_web_config() {
        let script = render_worker_script(&web_config());
        assert!(script.contains(r#""projectId":"tea-serve""#));
        assert!(script.contains(r#""messagingSenderId":"123""#));
    }

    #[test]
    fn test_script_applies_display_defaults() {
        let script = render_worker_script(&web_config());
        assert!(script.contains(r#"|| "Background Message""#));
        assert!(script.contains(r#"|| "default""#));
        assert!(script.contains(r#"action: "open""#));
        assert!(script.contains("requireInteraction: true"));
    }

    #[test]
    fn test_script_registers_one_handler() {
        let script = render_worker_script(&web_config());
        assert_eq!(script.matches("setBackgroundMessageHandler").count(), 1);
    }
}
