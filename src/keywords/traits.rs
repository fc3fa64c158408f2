// Keyword extractor trait — swap-ready abstraction.
//
// The default implementation counts nouns found by a rule-based tagger.
// Anything that can turn raw text into a ranked keyword list fits here.

/// Trait for extracting ranked keywords from a single text.
pub trait KeywordExtractor: Send + Sync {
    /// Return at most `n` keywords, most relevant first.
    ///
    /// Returns fewer than `n` (possibly none) when the text doesn't contain
    /// enough qualifying words. Callers decide how to pad.
    fn extract(&self, text: &str, n: usize) -> Vec<String>;
}
