use std::sync::Arc;

use crate::config::Settings;
use crate::dispatch::PushDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<PushDispatcher>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let dispatcher = Arc::new(PushDispatcher::new(settings.clone()));

        Self {
            settings,
            dispatcher,
        }
    }

    /// Build state around an existing dispatcher (tests inject a mock
    /// provider this way).
    pub fn with_dispatcher(settings: Settings, dispatcher: Arc<PushDispatcher>) -> Self {
        Self {
            settings: Arc::new(settings),
            dispatcher,
        }
    }
}
