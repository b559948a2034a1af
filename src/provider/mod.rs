//! Push provider abstraction and implementations.
//!
//! The gateway talks to exactly one provider per process. `FcmClient`
//! is the production implementation; `LoggingProvider` stands in when
//! no credential is configured, and `MockProvider` records sends for
//! tests.

mod credentials;
mod fcm;
mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Settings;
use crate::dispatch::Message;
use crate::error::Result;

pub use credentials::{CredentialSource, ServiceAccountKey};
pub use fcm::FcmClient;
pub use mock::{LoggingProvider, MockProvider};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to obtain access token: {0}")]
    Auth(String),

    #[error("{0}")]
    SendFailure(String),

    #[error("Failed to initialize push provider: {0}")]
    InitializationFailed(String),
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Submit one message, returning the provider-assigned message id.
    async fn send(&self, message: &Message) -> std::result::Result<String, ProviderError>;
}

/// Build the process-wide provider from settings.
///
/// Falls back to a logging provider when no credential source is
/// configured, so the gateway stays usable in development.
pub fn build_provider(settings: &Settings) -> Result<Arc<dyn PushProvider>> {
    match CredentialSource::from_settings(&settings.fcm) {
        Some(source) => {
            let key = source.resolve()?;
            tracing::info!(project_id = %key.project_id, "FCM provider initialized");
            Ok(Arc::new(FcmClient::new(key, &settings.fcm)?))
        }
        None => {
            tracing::warn!("No FCM credentials configured, push sends will only be logged");
            Ok(Arc::new(LoggingProvider::new()))
        }
    }
}
