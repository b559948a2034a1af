//! Push dispatch: request decoding, envelope construction, provider submission.

mod dispatcher;
mod message;
mod types;

pub use dispatcher::{DispatcherStatsSnapshot, ProviderFactory, PushDispatcher};
pub use message::{
    AndroidMessage, AndroidNotification, ApnsHeaders, ApnsMessage, ApnsPayload, Aps, Message,
    Notification,
};
pub use types::{DispatchReceipt, NotificationRequest};
