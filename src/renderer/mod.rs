//! Background notification rendering for the web client.
//!
//! The display semantics live in `display`; `worker` generates the
//! `firebase-messaging-sw.js` script that applies the same defaults in
//! the browser.

mod display;
mod payload;
mod worker;

pub use display::{
    render_notification, DisplayAssets, DisplayOptions, NotificationAction, NotificationDisplay,
    DEFAULT_TAG, DEFAULT_TITLE, OPEN_ACTION,
};
pub use payload::{BackgroundPushPayload, PushNotification};
pub use worker::render_worker_script;
