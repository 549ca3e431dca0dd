use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentiment label attached to a single analyzed text.
///
/// `Error` marks a text the classifier failed on; it is carried through
/// aggregation but never counted in the sentiment distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
    Error,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Error => "Error",
        }
    }
}

/// Raw model output: ordered three-way probability distribution, each score
/// in [0, 1], summing to ~1. Produced once per text, before fusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawClassification {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl RawClassification {
    pub fn sum(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }
}

/// Per-label scores keyed by display label (post-fusion or raw).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    #[serde(rename = "Negative")]
    pub negative: f64,
    #[serde(rename = "Neutral")]
    pub neutral: f64,
    #[serde(rename = "Positive")]
    pub positive: f64,
}

impl ScoreTriple {
    pub fn zero() -> Self {
        Self {
            negative: 0.0,
            neutral: 0.0,
            positive: 0.0,
        }
    }

    /// Label with the maximum score and that score. Ties go to the
    /// earliest-declared label: Negative, then Neutral, then Positive.
    pub fn max_label(&self) -> (SentimentLabel, f64) {
        let ordered = [
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Neutral, self.neutral),
            (SentimentLabel::Positive, self.positive),
        ];
        let mut best = ordered[0];
        for &candidate in &ordered[1..] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best
    }

    pub fn sum(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }
}

impl From<RawClassification> for ScoreTriple {
    fn from(raw: RawClassification) -> Self {
        Self {
            negative: raw.negative,
            neutral: raw.neutral,
            positive: raw.positive,
        }
    }
}

/// Keyword-frequency sentiment prior over a fixed financial vocabulary.
/// Stateless, recomputed per text; the three values sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexiconBias {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl LexiconBias {
    /// Near-uniform prior used when no keyword matches, weighted slightly
    /// toward neutral so the three values still sum to exactly 1.
    pub fn fallback() -> Self {
        Self {
            positive: 0.33,
            negative: 0.33,
            neutral: 0.34,
        }
    }

    pub fn zero() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

/// Per-text analysis result. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub scores: ScoreTriple,
    pub financial_bias: LexiconBias,
    pub source: Option<String>,
    /// Pre-fusion model scores; absent for short-circuited or failed texts.
    pub raw_scores: Option<ScoreTriple>,
}

/// Sentiment counts over a batch. `Error` results are not counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: u32,
    #[serde(rename = "Neutral")]
    pub neutral: u32,
    #[serde(rename = "Negative")]
    pub negative: u32,
}

impl SentimentDistribution {
    pub fn total(&self) -> u32 {
        self.positive + self.neutral + self.negative
    }

    /// Label with the highest count. Ties go to the earliest-listed label:
    /// Positive, then Neutral, then Negative.
    pub fn dominant(&self) -> SentimentLabel {
        let ordered = [
            (SentimentLabel::Positive, self.positive),
            (SentimentLabel::Neutral, self.neutral),
            (SentimentLabel::Negative, self.negative),
        ];
        let mut best = ordered[0];
        for &candidate in &ordered[1..] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Per-source sentiment counts within a batch. `total` counts every result
/// from the source, including `Error` ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    #[serde(rename = "Positive")]
    pub positive: u32,
    #[serde(rename = "Neutral")]
    pub neutral: u32,
    #[serde(rename = "Negative")]
    pub negative: u32,
    pub total: u32,
}

/// Discrete market-outlook verdict derived from aggregated ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    #[serde(rename = "Strongly Bullish")]
    StronglyBullish,
    #[serde(rename = "Bullish")]
    Bullish,
    #[serde(rename = "Strongly Bearish")]
    StronglyBearish,
    #[serde(rename = "Bearish")]
    Bearish,
    #[serde(rename = "Mixed/Neutral")]
    MixedNeutral,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl MarketOutlook {
    pub fn label(&self) -> &'static str {
        match self {
            MarketOutlook::StronglyBullish => "Strongly Bullish",
            MarketOutlook::Bullish => "Bullish",
            MarketOutlook::StronglyBearish => "Strongly Bearish",
            MarketOutlook::Bearish => "Bearish",
            MarketOutlook::MixedNeutral => "Mixed/Neutral",
            MarketOutlook::Unknown => "Unknown",
        }
    }

    /// Rank on the bullish axis, for comparing verdicts.
    pub fn bullish_rank(&self) -> i32 {
        match self {
            MarketOutlook::StronglyBullish => 2,
            MarketOutlook::Bullish => 1,
            MarketOutlook::MixedNeutral | MarketOutlook::Unknown => 0,
            MarketOutlook::Bearish => -1,
            MarketOutlook::StronglyBearish => -2,
        }
    }
}

/// Confidence tier attached to an outlook verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlookConfidence {
    Low,
    Medium,
    High,
}

/// Outlook verdict with its supporting combined ratios. The ratio fields are
/// absent on the no-data verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookVerdict {
    pub outlook: MarketOutlook,
    pub confidence: OutlookConfidence,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_ratio: Option<f64>,
}

impl OutlookVerdict {
    pub fn no_data() -> Self {
        Self {
            outlook: MarketOutlook::Unknown,
            confidence: OutlookConfidence::Low,
            description: "No data available".to_string(),
            positive_ratio: None,
            negative_ratio: None,
        }
    }
}

/// Aggregated view of one batch. Built once per batch, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total_analyzed: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub source_breakdown: BTreeMap<String, SourceCounts>,
    pub dominant_sentiment: SentimentLabel,
    pub average_confidence: f64,
    pub financial_bias_summary: LexiconBias,
    pub market_outlook: OutlookVerdict,
    pub detailed_results: Vec<SentimentResult>,
}

/// Headlines and market snippets pulled from one source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedNews {
    pub headlines: Vec<String>,
    pub stock_news: Vec<String>,
}

impl ScrapedNews {
    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty() && self.stock_news.is_empty()
    }

    /// Headlines followed by stock news, in scrape order.
    pub fn all_texts(&self) -> Vec<String> {
        let mut texts = self.headlines.clone();
        texts.extend(self.stock_news.iter().cloned());
        texts
    }
}

/// One source's scrape outcome: either extracted news or an error marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePayload {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ScrapedNews>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourcePayload {
    pub fn ok(source: impl Into<String>, data: ScrapedNews) -> Self {
        Self {
            source: source.into(),
            fetched_at: Utc::now(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fetched_at: Utc::now(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// One source's full analysis inside a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceAnalysis {
    pub source: String,
    pub sentiment_summary: SentimentSummary,
    pub article_count: usize,
    pub dominant_sentiment: SentimentLabel,
    pub confidence: f64,
    pub market_outlook: OutlookVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BullishPick {
    pub source: String,
    pub positive_count: u32,
    pub outlook: MarketOutlook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearishPick {
    pub source: String,
    pub negative_count: u32,
    pub outlook: MarketOutlook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePick {
    pub source: String,
    pub confidence: f64,
    pub article_count: usize,
}

/// Extremal picks across sources, or a message when nothing was analyzable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonSummary {
    NoData {
        message: String,
    },
    Ranked {
        most_bullish_source: BullishPick,
        most_bearish_source: BearishPick,
        highest_confidence_source: ConfidencePick,
        total_sources: usize,
    },
}

/// Cross-source comparison. `source_analyses` keeps caller order so the
/// first-seen tie-break on extremal picks is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceComparison {
    pub source_analyses: Vec<SourceAnalysis>,
    pub comparison_summary: ComparisonSummary,
}
