use crate::config::TrackerConfig;
use crate::records::MarkRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Owned by the request loop; one request at a time.
pub struct AppState {
    pub config: TrackerConfig,
    pub snapshot: Vec<MarkRecord>,
}

impl AppState {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            snapshot: Vec::new(),
        }
    }
}
