// Keyword extraction — local noun-frequency keywords, no API calls.
//
// The pipeline asks for the three most frequent nouns in a text. Nouns are
// found with a part-of-speech tagger behind the PosTagger trait so a
// statistical tagger can replace the lexicon rules later.

pub mod nouns;
pub mod tagger;
pub mod traits;

/// How many keywords the pipeline asks for by default.
pub const DEFAULT_KEYWORD_COUNT: usize = 3;
