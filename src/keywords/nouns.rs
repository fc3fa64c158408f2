// Noun-frequency keyword extraction.
//
// Lowercase the text, blank out everything that isn't [a-z0-9] or whitespace,
// tag the tokens, keep nouns longer than two characters that aren't stop
// words, and rank them by frequency. Ties keep first-occurrence order.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::tagger::{LexiconTagger, PosTagger};
use super::traits::KeywordExtractor;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("static pattern is valid"));

/// Shortest noun (in characters) that can become a keyword, exclusive.
const MIN_NOUN_LEN: usize = 2;

/// Keyword extractor that returns the most frequent nouns in a text.
///
/// The stop-word set and tagger are loaded once at construction and only
/// read afterwards, so a single extractor can serve concurrent requests.
pub struct NounFrequencyExtractor {
    stop_words: HashSet<String>,
    tagger: Box<dyn PosTagger>,
}

impl Default for NounFrequencyExtractor {
    fn default() -> Self {
        Self::with_tagger(Box::new(LexiconTagger::default()))
    }
}

impl NounFrequencyExtractor {
    /// Build an extractor around a specific tagger, using English stop words.
    pub fn with_tagger(tagger: Box<dyn PosTagger>) -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self {
            stop_words: stop_words.into_iter().collect(),
            tagger,
        }
    }

    /// Whether a word is in the stop-word set.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl KeywordExtractor for NounFrequencyExtractor {
    fn extract(&self, text: &str, n: usize) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned = NON_ALPHANUMERIC.replace_all(&lowered, " ");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let tags = self.tagger.tag(&tokens);

        // Frequency table in first-seen order so the stable sort below
        // breaks ties by first occurrence.
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for (&token, tag) in tokens.iter().zip(tags) {
            if !tag.is_noun()
                || token.chars().count() <= MIN_NOUN_LEN
                || self.stop_words.contains(token)
            {
                continue;
            }
            let next = counts.len();
            let i = *positions.entry(token).or_insert(next);
            if i == next {
                counts.push((token, 0));
            }
            counts[i].1 += 1;
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));

        debug!(
            tokens = tokens.len(),
            distinct_nouns = counts.len(),
            "Counted candidate nouns"
        );

        counts
            .into_iter()
            .take(n)
            .map(|(word, _)| word.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_frequent_nouns_first() {
        let extractor = NounFrequencyExtractor::default();
        let text = "The engine powers the rocket. A rocket needs fuel, and the rocket \
                    burns fuel. Engineers test the engine and the rocket again.";
        let keywords = extractor.extract(text, 3);
        assert_eq!(keywords[0], "rocket");
        assert_eq!(keywords.len(), 3);
        assert!(keywords.contains(&"engine".to_string()));
        assert!(keywords.contains(&"fuel".to_string()));
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let extractor = NounFrequencyExtractor::default();
        let keywords = extractor.extract("garden kitchen garage", 3);
        assert_eq!(keywords, vec!["garden", "kitchen", "garage"]);
    }

    #[test]
    fn test_punctuation_and_case_are_normalized() {
        let extractor = NounFrequencyExtractor::default();
        let keywords = extractor.extract("Telescope! TELESCOPE, telescope? Planet.", 2);
        assert_eq!(keywords, vec!["telescope", "planet"]);
    }

    #[test]
    fn test_short_words_are_skipped() {
        let extractor = NounFrequencyExtractor::default();
        let keywords = extractor.extract("ox ox ox ox cat", 3);
        assert_eq!(keywords, vec!["cat"]);
    }

    #[test]
    fn test_respects_n() {
        let extractor = NounFrequencyExtractor::default();
        let keywords = extractor.extract("apple banana cherry melon grape", 2);
        assert_eq!(keywords.len(), 2);
        assert!(extractor.extract("apple banana", 0).is_empty());
    }

    #[test]
    fn test_no_nouns_returns_empty() {
        let extractor = NounFrequencyExtractor::default();
        assert!(extractor.extract("the and of it is", 3).is_empty());
        assert!(extractor.extract("!!! ???", 3).is_empty());
    }
}
