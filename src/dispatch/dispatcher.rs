use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::config::Settings;
use crate::error::Result;
use crate::provider::{self, PushProvider};

use super::{DispatchReceipt, Message, NotificationRequest};

/// Factory building the provider client on first use.
pub type ProviderFactory =
    Arc<dyn Fn(&Settings) -> Result<Arc<dyn PushProvider>> + Send + Sync>;

/// Statistics for the push dispatcher
#[derive(Debug, Default)]
struct DispatcherStats {
    /// Requests rejected before reaching the provider
    rejected: AtomicU64,
    /// Messages submitted to the provider
    dispatched: AtomicU64,
    /// Messages the provider accepted
    delivered: AtomicU64,
    /// Messages the provider refused
    failed: AtomicU64,
}

/// Snapshot of dispatcher statistics
#[derive(Debug, Clone, Serialize)]
pub struct DispatcherStatsSnapshot {
    pub rejected: u64,
    pub dispatched: u64,
    pub delivered: u64,
    pub failed: u64,
}

/// Validates push requests, builds the provider envelope, and submits it.
///
/// The provider client is constructed at most once per process; concurrent
/// first calls await the single in-flight initialization.
pub struct PushDispatcher {
    settings: Arc<Settings>,
    provider: OnceCell<Arc<dyn PushProvider>>,
    factory: ProviderFactory,
    stats: DispatcherStats,
}

impl PushDispatcher {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self::with_factory(settings, Arc::new(provider::build_provider))
    }

    /// Create a dispatcher with a custom provider factory.
    pub fn with_factory(settings: Arc<Settings>, factory: ProviderFactory) -> Self {
        Self {
            settings,
            provider: OnceCell::new(),
            factory,
            stats: DispatcherStats::default(),
        }
    }

    /// Create a dispatcher around an already-initialized provider.
    pub fn with_provider(settings: Arc<Settings>, provider: Arc<dyn PushProvider>) -> Self {
        let fallback = provider.clone();
        Self {
            settings,
            provider: OnceCell::new_with(Some(provider)),
            factory: Arc::new(move |_| Ok(fallback.clone())),
            stats: DispatcherStats::default(),
        }
    }

    async fn provider(&self) -> Result<&Arc<dyn PushProvider>> {
        self.provider
            .get_or_try_init(|| async { (self.factory)(&self.settings) })
            .await
    }

    /// Decode, validate, and forward one push request.
    pub async fn dispatch(&self, raw: &[u8]) -> Result<DispatchReceipt> {
        let request = match NotificationRequest::decode(raw) {
            Ok(request) => request,
            Err(e) => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };

        let message = Message::from_request(&request, &self.settings.android);
        let provider = self.provider().await?;

        self.stats.dispatched.fetch_add(1, Ordering::Relaxed);
        match provider.send(&message).await {
            Ok(message_id) => {
                self.stats.delivered.fetch_add(1, Ordering::Relaxed);
                tracing::info!(message_id = %message_id, "Push notification sent");
                Ok(DispatchReceipt::sent(message_id))
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(error = %e, "Error sending push notification");
                Err(e.into())
            }
        }
    }

    pub fn stats(&self) -> DispatcherStatsSnapshot {
        DispatcherStatsSnapshot {
            rejected: self.stats.rejected.load(Ordering::Relaxed),
            dispatched: self.stats.dispatched.load(Ordering::Relaxed),
            delivered: self.stats.delivered.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }
}
