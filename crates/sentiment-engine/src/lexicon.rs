//! Keyword-frequency sentiment prior from a fixed financial vocabulary.

use sentiment_core::LexiconBias;

const POSITIVE_KEYWORDS: &[&str] = &[
    "surge", "rally", "gains", "bullish", "upward", "growth", "profit", "earnings",
    "outperform", "beat", "strong", "robust", "recovery", "boom", "soar", "climb",
    "rise", "increase", "advance", "momentum", "optimistic", "confident", "upgrade",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "plunge", "crash", "decline", "bearish", "downward", "loss", "deficit", "miss",
    "underperform", "weak", "fragile", "recession", "slump", "fall", "drop",
    "decrease", "retreat", "pessimistic", "concern", "worry", "downgrade", "risk",
];

const NEUTRAL_KEYWORDS: &[&str] = &[
    "stable", "steady", "maintain", "hold", "unchanged", "flat", "sideways",
    "consolidate", "range", "mixed", "moderate", "cautious", "watch", "monitor",
];

/// Score the lexicon bias of a text.
///
/// Case-folds the text and counts one hit per keyword contained in it.
/// Matching is substring-based: a keyword inside a longer word still counts
/// ("surge" matches "surges", "risk" matches "brisket"). With no hits at all
/// the near-uniform fallback is returned; otherwise counts are normalized by
/// the grand total so the three categories sum to 1.
///
/// Pure function of the text content.
pub fn financial_bias(text: &str) -> LexiconBias {
    let lower = text.to_lowercase();
    let hits = |keywords: &[&str]| keywords.iter().filter(|k| lower.contains(**k)).count();

    let positive = hits(POSITIVE_KEYWORDS);
    let negative = hits(NEGATIVE_KEYWORDS);
    let neutral = hits(NEUTRAL_KEYWORDS);

    let total = positive + negative + neutral;
    if total == 0 {
        return LexiconBias::fallback();
    }

    let total = total as f64;
    LexiconBias {
        positive: positive as f64 / total,
        negative: negative as f64 / total,
        neutral: neutral as f64 / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_falls_back_to_near_uniform() {
        let bias = financial_bias("The committee will meet on Tuesday");
        assert_eq!(bias, LexiconBias::fallback());
    }

    #[test]
    fn test_positive_keywords_skew_the_bias() {
        let bias = financial_bias("Stock market surges on positive earnings reports");
        // "surge" (inside "surges") and "earnings" both hit
        assert!((bias.positive - 1.0).abs() < 1e-9);
        assert_eq!(bias.negative, 0.0);
        assert_eq!(bias.neutral, 0.0);
    }

    #[test]
    fn test_mixed_keywords_are_normalized_by_grand_total() {
        // "rally" positive, "crash" + "loss" negative, "steady" neutral
        let bias = financial_bias("rally fades: crash fears and loss estimates, steady for now");
        assert!((bias.positive - 0.25).abs() < 1e-9);
        assert!((bias.negative - 0.5).abs() < 1e-9);
        assert!((bias.neutral - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_substring_matches_inside_longer_words() {
        // "risk" hides inside "brisket"; "rise" hits too
        let bias = financial_bias("Brisket prices rise");
        assert!((bias.positive - 0.5).abs() < 1e-9);
        assert!((bias.negative - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bias_always_sums_to_one() {
        for text in ["", "surge", "crash crash crash", "hold steady", "no signal here"] {
            let bias = financial_bias(text);
            assert!((bias.sum() - 1.0).abs() < 1e-6, "bias for {:?}: {:?}", text, bias);
        }
    }

    #[test]
    fn test_idempotent() {
        let text = "Markets rally as recession fears retreat";
        assert_eq!(financial_bias(text), financial_bias(text));
    }
}
