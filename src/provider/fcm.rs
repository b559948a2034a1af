//! FCM HTTP v1 client.
//!
//! Authentication follows the OAuth2 service-account flow: an RS256-signed
//! JWT assertion is exchanged at the key's token endpoint for a short-lived
//! bearer token, cached until shortly before expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::FcmConfig;
use crate::dispatch::Message;
use crate::error::{AppError, Result};

use super::{ProviderError, PushProvider, ServiceAccountKey};

const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Assertion lifetime in seconds (the maximum Google accepts)
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh the cached token this many seconds before it expires
const EXPIRY_MARGIN_SECS: i64 = 60;

pub struct FcmClient {
    http: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    send_url: String,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    /// Resource name `projects/*/messages/{id}`, reported as the message id
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl FcmClient {
    pub fn new(key: ServiceAccountKey, fcm: &FcmConfig) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AppError::Credentials(format!("invalid private key: {}", e)))?;
        let project_id = fcm.project_id.as_deref().unwrap_or(&key.project_id);
        let send_url = send_url(&fcm.endpoint, project_id);

        Ok(Self {
            http: reqwest::Client::new(),
            key,
            encoding_key,
            send_url,
            token: Mutex::new(None),
        })
    }

    fn assertion(&self, now: DateTime<Utc>) -> std::result::Result<String, ProviderError> {
        let claims = assertion_claims(&self.key, now.timestamp());
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| ProviderError::Auth(e.to_string()))
    }

    /// Return a valid bearer token, exchanging a fresh assertion when the
    /// cached one is missing or about to expire. Callers racing on a cold
    /// cache serialize on the mutex, so only one exchange is in flight.
    async fn access_token(&self) -> std::result::Result<String, ProviderError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        let assertion = self.assertion(now)?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Auth(e.to_string()))?;

        let fresh = CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds((token.expires_in - EXPIRY_MARGIN_SECS).max(0)),
        };
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }
}

#[async_trait]
impl PushProvider for FcmClient {
    async fn send(&self, message: &Message) -> std::result::Result<String, ProviderError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(|e| ProviderError::SendFailure(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::SendFailure(e.to_string()))?;
            Ok(body.name)
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(ProviderError::SendFailure(send_error_message(status, &body)))
        }
    }
}

fn assertion_claims(key: &ServiceAccountKey, iat: i64) -> AssertionClaims<'_> {
    AssertionClaims {
        iss: &key.client_email,
        scope: MESSAGING_SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    }
}

fn send_url(endpoint: &str, project_id: &str) -> String {
    format!(
        "{}/v1/projects/{}/messages:send",
        endpoint.trim_end_matches('/'),
        project_id
    )
}

/// Extract the provider's error message, falling back to a status-based
/// phrase when the body carries none.
fn send_error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("FCM request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ServiceAccountKey {
        serde_json::from_value(serde_json::json!({
            "type": "service_account",
            "project_id": "tea-serve",
            "private_key": "unused",
            "client_email": "push@tea-serve.iam.gserviceaccount.com"
        }))
        .unwrap()
    }

    #[test]
    fn test_assertion_claims() {
        let key = key();
        let claims = assertion_claims(&key, 1_700_000_000);
        assert_eq!(claims.iss, "push@tea-serve.iam.gserviceaccount.com");
        assert_eq!(claims.scope, MESSAGING_SCOPE);
        assert_eq!(claims.aud, "https://oauth2.googleapis.com/token");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_send_url() {
        assert_eq!(
            send_url("https://fcm.googleapis.com", "tea-serve"),
            "https://fcm.googleapis.com/v1/projects/tea-serve/messages:send"
        );
        assert_eq!(
            send_url("http://localhost:9099/", "p"),
            "http://localhost:9099/v1/projects/p/messages:send"
        );
    }

    #[test]
    fn test_send_error_message_from_body() {
        let body = br#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        assert_eq!(
            send_error_message(reqwest::StatusCode::NOT_FOUND, body),
            "Requested entity was not found."
        );
    }

    #[test]
    fn test_send_error_message_fallback() {
        let message = send_error_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, b"oops");
        assert!(message.contains("500"));
    }

    #[test]
    fn test_cached_token_freshness() {
        let now = Utc::now();
        let token = CachedToken {
            access_token: "t".to_string(),
            expires_at: now + Duration::seconds(10),
        };
        assert!(token.is_fresh(now));
        assert!(!token.is_fresh(now + Duration::seconds(11)));
    }
}
