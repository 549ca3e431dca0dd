//! Batch aggregation: distribution counts, per-source breakdowns, averaged
//! bias totals, and the threshold-derived market outlook.

use sentiment_core::{
    LexiconBias, MarketOutlook, OutlookConfidence, OutlookVerdict, SentimentDistribution,
    SentimentLabel, SentimentResult, SentimentSummary, SourceCounts,
};
use std::collections::BTreeMap;

/// Breakdown key for results without a source tag.
const UNKNOWN_SOURCE: &str = "unknown";

/// Reduce a batch of per-text results into a summary.
///
/// `Error` results count toward `total_analyzed` and their source's running
/// total, but not toward the sentiment distribution, confidence, or bias
/// totals. An empty batch yields total 0, Neutral dominant, Unknown outlook.
pub fn summarize(results: Vec<SentimentResult>) -> SentimentSummary {
    let mut distribution = SentimentDistribution::default();
    let mut breakdown: BTreeMap<String, SourceCounts> = BTreeMap::new();
    let mut confidence_total = 0.0;
    let mut bias_totals = LexiconBias::zero();

    for result in &results {
        let counts = breakdown
            .entry(
                result
                    .source
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            )
            .or_default();
        counts.total += 1;

        match result.sentiment {
            SentimentLabel::Positive => {
                distribution.positive += 1;
                counts.positive += 1;
            }
            SentimentLabel::Neutral => {
                distribution.neutral += 1;
                counts.neutral += 1;
            }
            SentimentLabel::Negative => {
                distribution.negative += 1;
                counts.negative += 1;
            }
            SentimentLabel::Error => continue,
        }

        confidence_total += result.confidence;
        bias_totals.positive += result.financial_bias.positive;
        bias_totals.negative += result.financial_bias.negative;
        bias_totals.neutral += result.financial_bias.neutral;
    }

    let total_analyzed = results.len();
    let (average_confidence, financial_bias_summary) = if total_analyzed > 0 {
        let n = total_analyzed as f64;
        (
            confidence_total / n,
            LexiconBias {
                positive: bias_totals.positive / n,
                negative: bias_totals.negative / n,
                neutral: bias_totals.neutral / n,
            },
        )
    } else {
        (0.0, LexiconBias::zero())
    };

    let dominant_sentiment = if total_analyzed > 0 {
        distribution.dominant()
    } else {
        SentimentLabel::Neutral
    };

    let market_outlook = market_outlook(&distribution, &financial_bias_summary);

    SentimentSummary {
        total_analyzed,
        sentiment_distribution: distribution,
        source_breakdown: breakdown,
        dominant_sentiment,
        average_confidence,
        financial_bias_summary,
        market_outlook,
        detailed_results: results,
    }
}

/// Map aggregated counts and averaged bias to a discrete outlook verdict.
///
/// Count ratios and bias are averaged into combined ratios, then matched
/// against a strict first-match ladder: strongly bullish above 0.6,
/// bullish above 0.4, then the bearish mirror, else mixed. The verdict
/// carries the combined ratios.
pub fn market_outlook(
    distribution: &SentimentDistribution,
    bias: &LexiconBias,
) -> OutlookVerdict {
    let total = distribution.total();
    if total == 0 {
        return OutlookVerdict::no_data();
    }

    let total = total as f64;
    let positive_ratio = distribution.positive as f64 / total;
    let negative_ratio = distribution.negative as f64 / total;

    let combined_positive = (positive_ratio + bias.positive) / 2.0;
    let combined_negative = (negative_ratio + bias.negative) / 2.0;

    let (outlook, confidence, description) = if combined_positive > 0.6 {
        (
            MarketOutlook::StronglyBullish,
            OutlookConfidence::High,
            "Strong positive sentiment across sources",
        )
    } else if combined_positive > 0.4 {
        (
            MarketOutlook::Bullish,
            OutlookConfidence::Medium,
            "Generally positive market sentiment",
        )
    } else if combined_negative > 0.6 {
        (
            MarketOutlook::StronglyBearish,
            OutlookConfidence::High,
            "Strong negative sentiment across sources",
        )
    } else if combined_negative > 0.4 {
        (
            MarketOutlook::Bearish,
            OutlookConfidence::Medium,
            "Generally negative market sentiment",
        )
    } else {
        (
            MarketOutlook::MixedNeutral,
            OutlookConfidence::Medium,
            "Balanced sentiment with no clear direction",
        )
    };

    OutlookVerdict {
        outlook,
        confidence,
        description: description.to_string(),
        positive_ratio: Some(combined_positive),
        negative_ratio: Some(combined_negative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_core::ScoreTriple;

    fn result(
        sentiment: SentimentLabel,
        confidence: f64,
        source: Option<&str>,
    ) -> SentimentResult {
        SentimentResult {
            text: "t".to_string(),
            sentiment,
            confidence,
            scores: ScoreTriple::zero(),
            financial_bias: if sentiment == SentimentLabel::Error {
                LexiconBias::zero()
            } else {
                LexiconBias::fallback()
            },
            source: source.map(str::to_string),
            raw_scores: None,
        }
    }

    #[test]
    fn test_distribution_counts_sum_to_total() {
        let summary = summarize(vec![
            result(SentimentLabel::Positive, 0.8, None),
            result(SentimentLabel::Positive, 0.6, None),
            result(SentimentLabel::Neutral, 0.5, None),
            result(SentimentLabel::Negative, 0.7, None),
        ]);

        assert_eq!(summary.total_analyzed, 4);
        assert_eq!(summary.sentiment_distribution.total(), 4);
        assert_eq!(summary.dominant_sentiment, SentimentLabel::Positive);
        assert!((summary.average_confidence - 0.65).abs() < 1e-9);
        assert!(summary.average_confidence >= 0.0 && summary.average_confidence <= 1.0);
    }

    #[test]
    fn test_error_results_count_in_total_but_not_distribution() {
        let summary = summarize(vec![
            result(SentimentLabel::Positive, 0.9, Some("yahoo")),
            result(SentimentLabel::Error, 0.0, Some("yahoo")),
        ]);

        assert_eq!(summary.total_analyzed, 2);
        assert_eq!(summary.sentiment_distribution.total(), 1);
        // Bias from the Error result is excluded; the one valid fallback
        // bias is averaged over both results.
        assert!((summary.financial_bias_summary.sum() - 0.5).abs() < 1e-9);
        // The errored text still counts toward its source's running total
        let yahoo = &summary.source_breakdown["yahoo"];
        assert_eq!(yahoo.total, 2);
        assert_eq!(yahoo.positive, 1);
    }

    #[test]
    fn test_untagged_results_land_under_unknown() {
        let summary = summarize(vec![
            result(SentimentLabel::Neutral, 0.5, None),
            result(SentimentLabel::Neutral, 0.5, Some("livemint")),
        ]);
        assert_eq!(summary.source_breakdown["unknown"].total, 1);
        assert_eq!(summary.source_breakdown["livemint"].total, 1);
    }

    #[test]
    fn test_empty_batch_defaults() {
        let summary = summarize(vec![]);
        assert_eq!(summary.total_analyzed, 0);
        assert_eq!(summary.average_confidence, 0.0);
        assert_eq!(summary.dominant_sentiment, SentimentLabel::Neutral);
        assert_eq!(summary.market_outlook.outlook, MarketOutlook::Unknown);
        assert_eq!(summary.market_outlook.confidence, OutlookConfidence::Low);
        assert!(summary.detailed_results.is_empty());
    }

    #[test]
    fn test_averaged_bias_sums_to_one_without_errors() {
        let summary = summarize(vec![
            result(SentimentLabel::Positive, 0.9, None),
            result(SentimentLabel::Negative, 0.8, None),
        ]);
        assert!((summary.financial_bias_summary.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_outlook_ladder_matching() {
        let bias_pos = |p: f64| LexiconBias {
            positive: p,
            negative: 0.0,
            neutral: 1.0 - p,
        };
        let bias_neg = |n: f64| LexiconBias {
            positive: 0.0,
            negative: n,
            neutral: 1.0 - n,
        };

        let all_positive = SentimentDistribution {
            positive: 3,
            neutral: 0,
            negative: 0,
        };
        let verdict = market_outlook(&all_positive, &bias_pos(1.0));
        assert_eq!(verdict.outlook, MarketOutlook::StronglyBullish);
        assert_eq!(verdict.confidence, OutlookConfidence::High);
        assert!((verdict.positive_ratio.unwrap() - 1.0).abs() < 1e-9);

        let half_positive = SentimentDistribution {
            positive: 1,
            neutral: 1,
            negative: 0,
        };
        let verdict = market_outlook(&half_positive, &bias_pos(0.5));
        assert_eq!(verdict.outlook, MarketOutlook::Bullish);
        assert_eq!(verdict.confidence, OutlookConfidence::Medium);

        let all_negative = SentimentDistribution {
            positive: 0,
            neutral: 0,
            negative: 3,
        };
        let verdict = market_outlook(&all_negative, &bias_neg(1.0));
        assert_eq!(verdict.outlook, MarketOutlook::StronglyBearish);

        let half_negative = SentimentDistribution {
            positive: 0,
            neutral: 1,
            negative: 1,
        };
        let verdict = market_outlook(&half_negative, &bias_neg(0.5));
        assert_eq!(verdict.outlook, MarketOutlook::Bearish);

        let balanced = SentimentDistribution {
            positive: 1,
            neutral: 2,
            negative: 1,
        };
        let verdict = market_outlook(&balanced, &LexiconBias::fallback());
        assert_eq!(verdict.outlook, MarketOutlook::MixedNeutral);
        assert_eq!(verdict.confidence, OutlookConfidence::Medium);
    }

    #[test]
    fn test_outlook_no_data() {
        let verdict = market_outlook(&SentimentDistribution::default(), &LexiconBias::zero());
        assert_eq!(verdict.outlook, MarketOutlook::Unknown);
        assert_eq!(verdict.confidence, OutlookConfidence::Low);
        assert_eq!(verdict.description, "No data available");
        assert!(verdict.positive_ratio.is_none());
        assert!(verdict.negative_ratio.is_none());
    }

    #[test]
    fn test_outlook_bullish_rank_is_monotone_in_combined_positive() {
        // Fixed distribution, sweep the positive bias upward: the bullish
        // rank must never decrease.
        let distribution = SentimentDistribution {
            positive: 1,
            neutral: 1,
            negative: 0,
        };
        let mut last_rank = i32::MIN;
        for step in 0..=10 {
            let p = step as f64 / 10.0;
            let bias = LexiconBias {
                positive: p,
                negative: 0.0,
                neutral: 1.0 - p,
            };
            let rank = market_outlook(&distribution, &bias).outlook.bullish_rank();
            assert!(rank >= last_rank, "rank regressed at bias {}", p);
            last_rank = rank;
        }
    }
}
