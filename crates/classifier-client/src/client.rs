use crate::ClassifierConfig;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use sentiment_core::{RawClassification, SentimentClassifier, SentimentError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tolerance when checking that the model's three scores sum to 1.
const SCORE_SUM_TOLERANCE: f64 = 1e-3;

/// Process-wide client, built from the environment on first use. Concurrent
/// first use cannot double-construct it.
static SHARED: Lazy<ClassifierClient> =
    Lazy::new(|| ClassifierClient::new(ClassifierConfig::default()));

#[derive(Debug, Clone, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ClassifyResponse {
    negative: f64,
    neutral: f64,
    positive: f64,
}

/// HTTP client for the sentiment model sidecar.
///
/// The model itself (a pretrained sequence-classification network plus
/// tokenizer) lives behind an HTTP service; this client is the only way the
/// engine reaches it.
#[derive(Clone)]
pub struct ClassifierClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(config: ClassifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url,
        }
    }

    pub fn with_base_url(base_url: String, timeout: Duration) -> Self {
        Self::new(ClassifierConfig {
            base_url,
            timeout,
            ..ClassifierConfig::default()
        })
    }

    /// Shared process-wide instance, configured from the environment.
    pub fn shared() -> &'static ClassifierClient {
        &SHARED
    }

    /// Check service health.
    pub async fn health(&self) -> Result<bool, SentimentError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| SentimentError::Classifier(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

/// Truncate to at most `max_length` characters, on a char boundary.
fn truncate_chars(text: &str, max_length: usize) -> &str {
    match text.char_indices().nth(max_length) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn validate(response: ClassifyResponse) -> Result<RawClassification, SentimentError> {
    let raw = RawClassification {
        negative: response.negative,
        neutral: response.neutral,
        positive: response.positive,
    };

    let in_range =
        |v: f64| (0.0..=1.0).contains(&v);
    if !in_range(raw.negative) || !in_range(raw.neutral) || !in_range(raw.positive) {
        return Err(SentimentError::InvalidResponse(format!(
            "score out of range: {:?}",
            raw
        )));
    }
    if (raw.sum() - 1.0).abs() > SCORE_SUM_TOLERANCE {
        return Err(SentimentError::InvalidResponse(format!(
            "scores sum to {:.4}, expected ~1",
            raw.sum()
        )));
    }

    Ok(raw)
}

#[async_trait]
impl SentimentClassifier for ClassifierClient {
    async fn classify(
        &self,
        text: &str,
        max_length: usize,
    ) -> Result<RawClassification, SentimentError> {
        let request = ClassifyRequest {
            text: truncate_chars(text, max_length),
        };

        let response = self
            .client
            .post(format!("{}/classify", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Classifier(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SentimentError::Classifier(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body = response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| SentimentError::InvalidResponse(e.to_string()))?;

        validate(body)
    }
}
