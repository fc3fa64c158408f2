// Confidence score heuristic.
//
// A rough 0-100 estimate of how much to trust an analysis. It is additive:
// start from a base, adjust for how much text there was, whether the summary
// has a sensible length, and how many topics actually appear in the text.
// Not a probability.

/// Configurable constants for the confidence heuristic.
pub struct ConfidenceWeights {
    /// Starting score (default 50)
    pub base: i32,
    /// Texts with more words than this get the long-text bonus (default 100)
    pub long_text_words: usize,
    /// Texts with fewer words than this get the short-text penalty (default 20)
    pub short_text_words: usize,
    /// Bonus for long texts (default 10)
    pub long_text_bonus: i32,
    /// Penalty for short texts (default 10)
    pub short_text_penalty: i32,
    /// Summary length in characters must be strictly inside this range (default 20..200)
    pub summary_min_chars: usize,
    pub summary_max_chars: usize,
    /// Bonus for a well-sized summary (default 10)
    pub summary_bonus: i32,
    /// Bonus per topic found in the text (default 5)
    pub topic_bonus: i32,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 50,
            long_text_words: 100,
            short_text_words: 20,
            long_text_bonus: 10,
            short_text_penalty: 10,
            summary_min_chars: 20,
            summary_max_chars: 200,
            summary_bonus: 10,
            topic_bonus: 5,
        }
    }
}

/// Compute the confidence score for an analysis of `text`.
///
/// Topics are matched as case-insensitive substrings of the text. Every
/// topic counts, duplicates included. The result is clamped to 0-100.
pub fn compute_confidence_score(
    text: &str,
    summary: &str,
    topics: &[String],
    weights: &ConfidenceWeights,
) -> u8 {
    let mut score = weights.base;

    let word_count = text.split_whitespace().count();
    if word_count > weights.long_text_words {
        score += weights.long_text_bonus;
    } else if word_count < weights.short_text_words {
        score -= weights.short_text_penalty;
    }

    let summary_len = summary.chars().count();
    if summary_len > weights.summary_min_chars && summary_len < weights.summary_max_chars {
        score += weights.summary_bonus;
    }

    let text_lower = text.to_lowercase();
    let topics_found = topics
        .iter()
        .filter(|topic| text_lower.contains(&topic.to_lowercase()))
        .count() as i32;
    score += topics_found * weights.topic_bonus;

    score.clamp(0, 100) as u8
}
