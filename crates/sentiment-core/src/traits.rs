use crate::{RawClassification, SentimentError};
use async_trait::async_trait;

/// Contract for the external sequence-classification model.
///
/// The engine only ever sees this trait: it hands over a normalized text and
/// the model's maximum input length, and gets back an ordered three-way
/// probability distribution. Truncation to `max_length` is the implementor's
/// concern.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(
        &self,
        text: &str,
        max_length: usize,
    ) -> Result<RawClassification, SentimentError>;
}
