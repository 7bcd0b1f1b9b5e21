// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::analyzer::MessageAnalyzer;
use crate::services::metrics_manager::MetricsManager;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub analyzer: MessageAnalyzer,
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    pub admin_api_key: Option<String>,
}

impl AppState {
    pub fn new(analyzer: MessageAnalyzer, session_ttl: Duration) -> Self {
        Self {
            analyzer,
            sessions: SessionManager::new(session_ttl),
            metrics: MetricsManager::new(),
            admin_api_key: None,
        }
    }

    pub fn with_admin_key(mut self, key: Option<String>) -> Self {
        self.admin_api_key = key;
        self
    }
}
