//! Cross-source comparison: run each source's scrape payload through the
//! engine and pick the most bullish, most bearish and most confident source.

use crate::{summarize, SentimentEngine};
use sentiment_core::{
    BearishPick, BullishPick, ComparisonSummary, ConfidencePick, SourceAnalysis,
    SourceComparison, SourcePayload,
};

const NO_DATA_MESSAGE: &str = "No source data available for comparison";

impl SentimentEngine {
    /// Compare sentiment across sources.
    ///
    /// Payloads are taken in caller order; errored or empty sources are
    /// skipped, never fatal. Every analyzed text is tagged with its source
    /// name. With nothing analyzable the summary is a plain message instead
    /// of extremal picks.
    pub async fn compare_sources(&self, payloads: &[SourcePayload]) -> SourceComparison {
        let mut source_analyses = Vec::new();

        for payload in payloads {
            let Some(data) = &payload.data else {
                tracing::debug!(source = %payload.source, "Skipping errored source");
                continue;
            };
            let texts = data.all_texts();
            if texts.is_empty() {
                continue;
            }

            let sources = vec![payload.source.clone(); texts.len()];
            let results = self.analyze_batch(&texts, Some(&sources)).await;
            let summary = summarize(results);

            source_analyses.push(SourceAnalysis {
                source: payload.source.clone(),
                article_count: texts.len(),
                dominant_sentiment: summary.dominant_sentiment,
                confidence: summary.average_confidence,
                market_outlook: summary.market_outlook.clone(),
                sentiment_summary: summary,
            });
        }

        let comparison_summary = rank_sources(&source_analyses);
        SourceComparison {
            source_analyses,
            comparison_summary,
        }
    }
}

/// Extremal selection over analyzed sources. Strict comparisons, so ties go
/// to the first-seen source.
fn rank_sources(analyses: &[SourceAnalysis]) -> ComparisonSummary {
    let Some(first) = analyses.first() else {
        return ComparisonSummary::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        };
    };

    let mut most_bullish = first;
    let mut most_bearish = first;
    let mut highest_confidence = first;
    for analysis in &analyses[1..] {
        let dist = analysis.sentiment_summary.sentiment_distribution;
        if dist.positive > most_bullish.sentiment_summary.sentiment_distribution.positive {
            most_bullish = analysis;
        }
        if dist.negative > most_bearish.sentiment_summary.sentiment_distribution.negative {
            most_bearish = analysis;
        }
        if analysis.confidence > highest_confidence.confidence {
            highest_confidence = analysis;
        }
    }

    ComparisonSummary::Ranked {
        most_bullish_source: BullishPick {
            source: most_bullish.source.clone(),
            positive_count: most_bullish
                .sentiment_summary
                .sentiment_distribution
                .positive,
            outlook: most_bullish.market_outlook.outlook,
        },
        most_bearish_source: BearishPick {
            source: most_bearish.source.clone(),
            negative_count: most_bearish
                .sentiment_summary
                .sentiment_distribution
                .negative,
            outlook: most_bearish.market_outlook.outlook,
        },
        highest_confidence_source: ConfidencePick {
            source: highest_confidence.source.clone(),
            confidence: highest_confidence.confidence,
            article_count: highest_confidence.article_count,
        },
        total_sources: analyses.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::positive_leaning;
    use sentiment_core::{ScrapedNews, SentimentLabel};
    use std::sync::Arc;

    fn engine() -> SentimentEngine {
        SentimentEngine::new(Arc::new(positive_leaning()))
    }

    fn payload(source: &str, headlines: &[&str], stock_news: &[&str]) -> SourcePayload {
        SourcePayload::ok(
            source,
            ScrapedNews {
                headlines: headlines.iter().map(|s| s.to_string()).collect(),
                stock_news: stock_news.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    #[tokio::test]
    async fn test_errored_source_is_excluded_and_best_source_wins() {
        let payloads = vec![
            payload(
                "A",
                &[
                    "Markets rally on strong earnings",
                    "Shares surge after upbeat guidance",
                ],
                &["Tech stocks climb to record gains"],
            ),
            payload("B", &["Index advances modestly"], &[]),
            SourcePayload::failed("C", "connection reset"),
        ];

        let comparison = engine().compare_sources(&payloads).await;

        assert_eq!(comparison.source_analyses.len(), 2);
        assert!(comparison.source_analyses.iter().all(|a| a.source != "C"));

        match comparison.comparison_summary {
            ComparisonSummary::Ranked {
                most_bullish_source,
                total_sources,
                ..
            } => {
                assert_eq!(most_bullish_source.source, "A");
                assert_eq!(most_bullish_source.positive_count, 3);
                assert_eq!(total_sources, 2);
            }
            ComparisonSummary::NoData { .. } => panic!("expected ranked summary"),
        }
    }

    #[tokio::test]
    async fn test_every_result_is_tagged_with_its_source() {
        let payloads = vec![payload("livemint", &["Markets rally"], &["Stocks climb"])];
        let comparison = engine().compare_sources(&payloads).await;

        let analysis = &comparison.source_analyses[0];
        assert_eq!(analysis.article_count, 2);
        assert!(analysis
            .sentiment_summary
            .detailed_results
            .iter()
            .all(|r| r.source.as_deref() == Some("livemint")));
        assert_eq!(analysis.sentiment_summary.source_breakdown["livemint"].total, 2);
        assert_eq!(analysis.dominant_sentiment, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn test_no_analyzable_sources_yields_message() {
        let payloads = vec![
            SourcePayload::failed("A", "timeout"),
            payload("B", &[], &[]),
        ];
        let comparison = engine().compare_sources(&payloads).await;

        assert!(comparison.source_analyses.is_empty());
        assert_eq!(
            comparison.comparison_summary,
            ComparisonSummary::NoData {
                message: "No source data available for comparison".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_ties_go_to_the_first_seen_source() {
        // Same single neutral-keyword-free text per source: identical counts
        // and confidence everywhere.
        let payloads = vec![
            payload("first", &["The committee will meet on Tuesday"], &[]),
            payload("second", &["The committee will meet on Tuesday"], &[]),
        ];
        let comparison = engine().compare_sources(&payloads).await;

        match comparison.comparison_summary {
            ComparisonSummary::Ranked {
                most_bullish_source,
                most_bearish_source,
                highest_confidence_source,
                ..
            } => {
                assert_eq!(most_bullish_source.source, "first");
                assert_eq!(most_bearish_source.source, "first");
                assert_eq!(highest_confidence_source.source, "first");
            }
            ComparisonSummary::NoData { .. } => panic!("expected ranked summary"),
        }
    }
}
