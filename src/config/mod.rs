mod settings;

pub use settings::{
    AndroidConfig, ApiConfig, FcmConfig, ServerConfig, Settings, WebPushConfig,
};
