use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fcm: FcmConfig,
    #[serde(default)]
    pub android: AndroidConfig,
    /// Firebase web-app configuration used to generate the messaging
    /// service worker. The worker route returns 404 when absent.
    #[serde(default)]
    pub web_push: Option<WebPushConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
}

/// Provider credentials and endpoint. Exactly one credential source is
/// needed; when several are set the order is inline, file, environment.
#[derive(Debug, Clone, Deserialize)]
pub struct FcmConfig {
    /// Overrides the project id from the service account key.
    pub project_id: Option<String>,
    /// Service account JSON embedded in configuration.
    pub credentials_json: Option<String>,
    /// Path to a service account JSON file.
    pub credentials_file: Option<String>,
    /// Name of an environment variable holding the service account JSON.
    pub credentials_env: Option<String>,
    #[serde(default = "default_fcm_endpoint")]
    pub endpoint: String,
}

/// Fixed Android delivery hints attached to every message.
#[derive(Debug, Clone, Deserialize)]
pub struct AndroidConfig {
    #[serde(default = "default_channel_id")]
    pub channel_id: String,
    #[serde(default = "default_click_action")]
    pub click_action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebPushConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_icon")]
    pub badge: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_fcm_endpoint() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_channel_id() -> String {
    "tea_serve_channel".to_string()
}

fn default_click_action() -> String {
    "FLUTTER_NOTIFICATION_CLICK".to_string()
}

fn default_icon() -> String {
    "/icons/Icon-192.png".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            .set_default("fcm.endpoint", "https://fcm.googleapis.com")?
            .set_default("android.channel_id", "tea_serve_channel")?
            .set_default("android.click_action", "FLUTTER_NOTIFICATION_CLICK")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER_HOST, SERVER_PORT, API_KEY, FCM_CREDENTIALS_FILE, etc.
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            credentials_json: None,
            credentials_file: None,
            credentials_env: None,
            endpoint: default_fcm_endpoint(),
        }
    }
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            channel_id: default_channel_id(),
            click_action: default_click_action(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8082);
    }

    #[test]
    fn test_android_defaults() {
        let android = AndroidConfig::default();
        assert_eq!(android.channel_id, "tea_serve_channel");
        assert_eq!(android.click_action, "FLUTTER_NOTIFICATION_CLICK");
    }

    #[test]
    fn test_fcm_defaults() {
        let fcm = FcmConfig::default();
        assert_eq!(fcm.endpoint, "https://fcm.googleapis.com");
        assert!(fcm.credentials_json.is_none());
        assert!(fcm.credentials_file.is_none());
        assert!(fcm.credentials_env.is_none());
    }
}
