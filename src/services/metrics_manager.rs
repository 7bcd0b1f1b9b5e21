use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Roles counted under their own name; anything else is counted as `other`.
pub const KNOWN_ROLES: &[&str] = &["patient", "doctor", "therapist", "counsellor", "caregiver", "student"];

fn role_bucket(role: &str) -> &'static str {
    KNOWN_ROLES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(role.trim()))
        .unwrap_or("other")
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MetricsData {
    pub intent_usage: HashMap<String, u64>,
    pub role_usage: HashMap<String, u64>,
    pub fallback_replies: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record(&self, intent: &str, role: &str, fallback: bool) {
        let mut data = self.inner.write().await;
        *data.intent_usage.entry(intent.to_string()).or_insert(0) += 1;
        *data.role_usage.entry(role_bucket(role).to_string()).or_insert(0) += 1;
        if fallback {
            data.fallback_replies += 1;
        }
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
