pub mod client;

pub use client::ClassifierClient;

use std::time::Duration;

/// Configuration for the sentiment model service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum input length the model accepts; longer texts are truncated
    /// before the request is sent.
    pub max_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("SENTIMENT_MODEL_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            timeout: std::env::var("SENTIMENT_MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or_else(|| Duration::from_secs(10)),
            max_length: 512,
        }
    }
}
