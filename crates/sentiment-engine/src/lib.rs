//! Sentiment scoring and aggregation engine for scraped financial news.
//!
//! Per text, the engine normalizes the input, asks the classifier model for a
//! three-way distribution, blends it with a financial-lexicon prior, and picks
//! a label. Batches of results are reduced into per-source distributions and
//! a discrete market-outlook verdict; summaries from multiple sources can be
//! compared to find the most bullish, most bearish and most confident one.

pub mod compare;
pub mod lexicon;
pub mod normalize;
pub mod summary;

pub use lexicon::financial_bias;
pub use normalize::normalize;
pub use summary::{market_outlook, summarize};

use sentiment_core::{
    LexiconBias, ScoreTriple, SentimentClassifier, SentimentLabel, SentimentResult,
    SentimentSummary,
};
use std::sync::Arc;

/// Weight of the lexicon prior in the blended distribution. The classifier
/// keeps the remaining 70%.
const FUSION_WEIGHT: f64 = 0.3;

/// Maximum input length passed to the classifier.
const DEFAULT_MAX_INPUT_LENGTH: usize = 512;

pub struct SentimentEngine {
    classifier: Arc<dyn SentimentClassifier>,
    max_input_length: usize,
}

impl SentimentEngine {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            classifier,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
        }
    }

    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }

    /// Analyze one text.
    ///
    /// Blank texts short-circuit to a canned neutral result without touching
    /// the classifier. A classifier failure degrades to an `Error`-labeled
    /// result carrying the already-computed lexicon bias; it never propagates.
    pub async fn analyze(&self, text: &str, source: Option<&str>) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult {
                text: text.to_string(),
                sentiment: SentimentLabel::Neutral,
                confidence: 0.0,
                scores: ScoreTriple {
                    negative: 0.33,
                    neutral: 0.34,
                    positive: 0.33,
                },
                financial_bias: LexiconBias::fallback(),
                source: source.map(str::to_string),
                raw_scores: None,
            };
        }

        let normalized = normalize(text);
        // The lexicon looks at the original text: placeholders and stripped
        // punctuation must not hide keyword hits.
        let bias = financial_bias(text);

        let raw = match self
            .classifier
            .classify(&normalized, self.max_input_length)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Classifier failed, degrading to Error result: {}", e);
                return SentimentResult {
                    text: text.to_string(),
                    sentiment: SentimentLabel::Error,
                    confidence: 0.0,
                    scores: ScoreTriple::zero(),
                    financial_bias: bias,
                    source: source.map(str::to_string),
                    raw_scores: None,
                };
            }
        };

        let adjusted = ScoreTriple {
            negative: raw.negative * (1.0 - FUSION_WEIGHT) + bias.negative * FUSION_WEIGHT,
            neutral: raw.neutral * (1.0 - FUSION_WEIGHT) + bias.neutral * FUSION_WEIGHT,
            positive: raw.positive * (1.0 - FUSION_WEIGHT) + bias.positive * FUSION_WEIGHT,
        };
        let (sentiment, confidence) = adjusted.max_label();

        SentimentResult {
            text: text.to_string(),
            sentiment,
            confidence,
            scores: adjusted,
            financial_bias: bias,
            source: source.map(str::to_string),
            raw_scores: Some(raw.into()),
        }
    }

    /// Analyze a batch of texts, optionally tagged with parallel source names.
    /// Results come back in input order.
    pub async fn analyze_batch(
        &self,
        texts: &[String],
        sources: Option<&[String]>,
    ) -> Vec<SentimentResult> {
        let mut results = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let source = sources.and_then(|s| s.get(i)).map(String::as_str);
            results.push(self.analyze(text, source).await);
        }
        results
    }

    /// Analyze a batch and reduce it to a summary in one call.
    pub async fn summarize_texts(
        &self,
        texts: &[String],
        sources: Option<&[String]>,
    ) -> SentimentSummary {
        summarize(self.analyze_batch(texts, sources).await)
    }
}
