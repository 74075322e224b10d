use std::sync::Arc;

use crate::config::AppConfig;
use crate::feddit::FedditClient;

/// Immutable per-process state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: FedditClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(client: FedditClient, config: AppConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}
