// Keyword extraction tests — properties of the noun-frequency extractor.
//
// The tagger is swappable, so some tests plug in a trivial tagger to pin
// down what the extractor itself does (normalization, stop words, ranking).

use quarry::keywords::nouns::NounFrequencyExtractor;
use quarry::keywords::tagger::{LexiconTagger, PosTag, PosTagger};
use quarry::keywords::traits::KeywordExtractor;
use quarry::keywords::DEFAULT_KEYWORD_COUNT;

/// Tags every token as a noun.
struct AllNouns;

impl PosTagger for AllNouns {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        vec![PosTag::Noun; tokens.len()]
    }
}

const SAMPLES: &[&str] = &[
    "The engine powers the rocket. A rocket needs fuel, and the rocket burns fuel.",
    "Machine learning models transform the economy and the labor market.",
    "I think we should go there tomorrow, but it might rain.",
    "Gardens, kitchens and garages: the house has everything a family needs.",
    "2024 was a year of elections, protests and surprising weather.",
    "",
    "!!! ??? ...",
];

#[test]
fn extract_never_exceeds_n() {
    let extractor = NounFrequencyExtractor::default();
    for text in SAMPLES {
        for n in 0..5 {
            assert!(extractor.extract(text, n).len() <= n, "{text:?} n={n}");
        }
    }
}

#[test]
fn keywords_are_long_non_stop_words() {
    let extractor = NounFrequencyExtractor::default();
    for text in SAMPLES {
        for keyword in extractor.extract(text, DEFAULT_KEYWORD_COUNT) {
            assert!(keyword.chars().count() > 2, "{keyword:?} too short");
            assert!(!extractor.is_stop_word(&keyword), "{keyword:?} is a stop word");
            assert_eq!(keyword, keyword.to_lowercase());
        }
    }
}

#[test]
fn keywords_are_distinct() {
    let extractor = NounFrequencyExtractor::default();
    for text in SAMPLES {
        let mut keywords = extractor.extract(text, 10);
        let before = keywords.len();
        keywords.sort();
        keywords.dedup();
        assert_eq!(keywords.len(), before, "duplicates in {text:?}");
    }
}

#[test]
fn stop_words_filtered_even_when_tagged_as_nouns() {
    let extractor = NounFrequencyExtractor::with_tagger(Box::new(AllNouns));
    let keywords = extractor.extract("the telescope and the nebula", 5);
    assert_eq!(keywords, vec!["telescope", "nebula"]);
}

#[test]
fn frequency_ranking_with_swapped_tagger() {
    let extractor = NounFrequencyExtractor::with_tagger(Box::new(AllNouns));
    let keywords = extractor.extract("nebula telescope nebula comet nebula telescope", 3);
    assert_eq!(keywords, vec!["nebula", "telescope", "comet"]);
}

#[test]
fn common_content_nouns_are_not_stop_words() {
    let extractor = NounFrequencyExtractor::default();
    for word in ["world", "problem", "work", "year", "system", "information"] {
        assert!(!extractor.is_stop_word(word), "{word:?} should be keyword-eligible");
    }

    let keywords = extractor.extract(
        "The world faces a problem. The world must work on the problem this year.",
        3,
    );
    assert_eq!(keywords[..2], ["world", "problem"]);
}

#[test]
fn third_person_verbs_are_not_keywords() {
    let extractor = NounFrequencyExtractor::default();
    let keywords = extractor.extract(
        "She quickly runs and jumps. He eats and sleeps. They swim and dance happily.",
        5,
    );
    for verb in ["runs", "jumps", "eats", "sleeps"] {
        assert!(!keywords.iter().any(|k| k == verb), "{verb:?} in {keywords:?}");
    }
}

#[test]
fn extraction_is_deterministic() {
    let extractor = NounFrequencyExtractor::default();
    let text = SAMPLES[1];
    assert_eq!(extractor.extract(text, 3), extractor.extract(text, 3));
}

#[test]
fn lexicon_tagger_handles_a_sentence() {
    let tagger = LexiconTagger::default();
    let tokens = ["the", "scientists", "will", "measure", "the", "signal"];
    let tags = tagger.tag(&tokens);
    assert_eq!(
        tags,
        vec![
            PosTag::Determiner,
            PosTag::PluralNoun,
            PosTag::Modal,
            PosTag::Verb,
            PosTag::Determiner,
            PosTag::Noun,
        ]
    );
}
