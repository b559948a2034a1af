//! Non-delivering providers: the development fallback and test support.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::dispatch::Message;

use super::{ProviderError, PushProvider};

/// Logs each would-be send instead of delivering it. Used when no FCM
/// credential is configured.
#[derive(Debug, Default)]
pub struct LoggingProvider {
    sequence: AtomicU64,
}

impl LoggingProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PushProvider for LoggingProvider {
    async fn send(&self, message: &Message) -> Result<String, ProviderError> {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            token = %message.token,
            title = %message.notification.title,
            body = %message.notification.body,
            "push notification (logging provider, not delivered)"
        );
        Ok(format!("local/messages/{}", n))
    }
}

/// Records every envelope it receives; optionally fails each send with a
/// scripted message.
#[derive(Debug, Default)]
pub struct MockProvider {
    sent: Mutex<Vec<Message>>,
    fail_with: Option<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    pub fn sent(&self) -> Vec<Message> {
        self.lock_sent().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.lock_sent().len()
    }

    fn lock_sent(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PushProvider for MockProvider {
    async fn send(&self, message: &Message) -> Result<String, ProviderError> {
        if let Some(message) = &self.fail_with {
            return Err(ProviderError::SendFailure(message.clone()));
        }
        let mut sent = self.lock_sent();
        sent.push(message.clone());
        Ok(format!("projects/test/messages/{}", sent.len()))
    }
}
