// Rule-based part-of-speech tagger.
//
// Keyword extraction only needs to know which tokens are nouns, so the tag
// set is coarse. The tagger sees lowercased, punctuation-free tokens, which
// means there is no capitalization cue: proper nouns come out as plain nouns.
//
// Tagging runs in three layers, first match wins:
//   1. numerals and a closed-class lexicon (determiners, pronouns, ...)
//   2. context: the previous tags decide modal + verb, -ing words, and
//      whether an -s word is a plural noun or a third-person verb
//   3. suffix rules (-ly, -ous, -ed, ...), falling back to noun

use std::collections::HashMap;

/// Coarse part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    /// Singular noun (common or proper)
    Noun,
    /// Plural noun (common or proper)
    PluralNoun,
    Verb,
    Modal,
    Adjective,
    Adverb,
    Number,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
}

impl PosTag {
    /// Whether this tag counts as a noun for keyword extraction.
    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::PluralNoun)
    }
}

/// Trait for tagging a token sequence. Returns one tag per token.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag>;
}

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "what", "which", "whose",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "whoever", "whatever", "someone", "anyone", "everyone", "nobody", "somebody", "anybody",
    "everybody", "something", "anything", "everything", "nothing",
];

/// Possessives read as determiners: "their apps" is a noun phrase.
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite", "down",
    "during", "except", "for", "from", "in", "inside", "into", "like", "near", "of", "off", "on",
    "onto", "out", "outside", "over", "past", "since", "through", "throughout", "till", "to",
    "toward", "towards", "under", "underneath", "until", "up", "upon", "via", "with", "within",
    "without", "per",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while",
    "whereas", "if", "unless", "whether", "than", "as", "once",
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const VERBS: &[&str] = &[
    // auxiliaries
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "done",
    // frequent verbs that are rarely nouns
    "become", "became", "becomes", "seem", "seems", "make", "makes", "made", "get", "gets",
    "got", "give", "gives", "gave", "given", "take", "takes", "took", "taken", "think",
    "thinks", "thought", "know", "knows", "knew", "known", "say", "says", "said", "tell",
    "tells", "told", "go", "goes", "went", "gone", "come", "comes", "came", "see", "sees",
    "saw", "seen", "find", "finds", "found", "include", "includes", "provide", "provides",
    "allow", "allows", "require", "requires", "create", "creates", "bring", "brings",
    "brought", "begin", "begins", "began", "keep", "keeps", "kept", "let", "lets", "put",
    "puts", "enable", "enables", "perform", "performs", "transform", "transforms", "improve",
    "improves", "remain", "remains", "believe", "believes", "appear", "appears", "suggest",
    "suggests", "continue", "continues", "looks", "feel", "feels", "felt", "grow", "grows",
    "grew", "understand", "understands", "understood", "leave", "leaves", "left", "build",
    "builds", "built", "help", "helps", "use", "uses",
];

const ADJECTIVES: &[&str] = &[
    "new", "old", "good", "bad", "great", "high", "low", "big", "small", "large", "long",
    "short", "little", "few", "many", "much", "more", "most", "less", "least", "other", "same",
    "different", "important", "possible", "able", "early", "late", "young", "real", "whole",
    "free", "full", "sure", "clear", "certain", "common", "likely", "recent", "major",
    "general", "specific", "main", "best", "better", "worse", "worst", "next", "last",
    "various", "several", "own", "human", "public", "private", "social", "local", "national",
    "global", "economic", "political", "financial", "digital", "artificial", "natural",
    "modern", "current", "final", "simple", "complex", "strong", "weak", "open", "hard",
    "easy", "significant", "positive", "negative", "neutral", "previous", "available",
    "entire", "exclusively", "increasingly",
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "just", "only", "even", "still", "already", "often", "always",
    "never", "sometimes", "usually", "really", "quite", "rather", "too", "almost", "again",
    "ever", "here", "there", "now", "then", "today", "tomorrow", "yesterday", "soon", "twice",
    "however", "therefore", "thus", "moreover", "furthermore", "instead", "perhaps", "maybe",
    "indeed", "well", "when", "where", "why", "how",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "hundred", "thousand", "million", "billion", "first", "second",
    "third",
];

/// Nouns that the -ly and -ing suffix rules would otherwise swallow.
const NOUN_EXCEPTIONS: &[&str] = &[
    "family", "supply", "reply", "assembly", "ally", "anomaly", "monopoly", "italy", "july",
    "rally", "belly", "jelly", "lily", "butterfly", "fly", "thing", "string", "spring",
    "morning", "evening", "ceiling", "wedding", "king", "ring", "wing", "sibling",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "less", "able", "ible", "ish", "ical"];

/// Deterministic lexicon + suffix tagger.
///
/// Built once and shared read-only; tagging allocates only the output vector.
pub struct LexiconTagger {
    lexicon: HashMap<&'static str, PosTag>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        let mut lexicon = HashMap::new();
        // Later groups win when a word appears in more than one list.
        let groups: [(&[&str], PosTag); 11] = [
            (PREPOSITIONS, PosTag::Preposition),
            (CONJUNCTIONS, PosTag::Conjunction),
            (DETERMINERS, PosTag::Determiner),
            (PRONOUNS, PosTag::Pronoun),
            (POSSESSIVES, PosTag::Determiner),
            (MODALS, PosTag::Modal),
            (VERBS, PosTag::Verb),
            (ADJECTIVES, PosTag::Adjective),
            (ADVERBS, PosTag::Adverb),
            (NUMBER_WORDS, PosTag::Number),
            (NOUN_EXCEPTIONS, PosTag::Noun),
        ];
        for (words, tag) in groups {
            for word in words {
                lexicon.insert(*word, tag);
            }
        }
        Self { lexicon }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        let mut tags = Vec::with_capacity(tokens.len());
        for token in tokens {
            let tag = self.tag_token(token, &tags);
            tags.push(tag);
        }
        tags
    }
}

impl LexiconTagger {
    /// Tag one token given the tags of everything before it.
    fn tag_token(&self, token: &str, preceding: &[PosTag]) -> PosTag {
        let previous = preceding.last().copied();

        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::Number;
        }
        if let Some(tag) = self.lexicon.get(token) {
            return *tag;
        }

        // "can transform", "will improve" — whatever follows a modal is a verb
        if previous == Some(PosTag::Modal) {
            return PosTag::Verb;
        }

        let len = token.len();

        if len > 4 && token.ends_with("ing") {
            return match previous {
                Some(
                    PosTag::Determiner
                    | PosTag::Adjective
                    | PosTag::Preposition
                    | PosTag::Noun
                    | PosTag::PluralNoun,
                ) => PosTag::Noun,
                _ => PosTag::Verb,
            };
        }

        if len > 3 && token.ends_with("ly") {
            return PosTag::Adverb;
        }

        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
            return PosTag::Adjective;
        }

        if len > 4 && token.ends_with("ed") && !token.ends_with("eed") {
            return PosTag::Verb;
        }

        if len > 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return if is_verb_slot(preceding) {
                PosTag::Verb
            } else {
                PosTag::PluralNoun
            };
        }

        PosTag::Noun
    }
}

/// Whether an -s word in this position reads as a third-person verb:
/// "she runs", "quickly jumps", or "runs and jumps".
fn is_verb_slot(preceding: &[PosTag]) -> bool {
    match preceding {
        [.., PosTag::Pronoun | PosTag::Adverb | PosTag::Modal] => true,
        [.., PosTag::Verb, PosTag::Conjunction] => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Vec<PosTag> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        LexiconTagger::default().tag(&tokens)
    }

    #[test]
    fn test_closed_class_words() {
        assert_eq!(
            tag("the of and it is can"),
            vec![
                PosTag::Determiner,
                PosTag::Preposition,
                PosTag::Conjunction,
                PosTag::Pronoun,
                PosTag::Verb,
                PosTag::Modal,
            ]
        );
    }

    #[test]
    fn test_nouns_and_plurals() {
        assert_eq!(
            tag("computer algorithms"),
            vec![PosTag::Noun, PosTag::PluralNoun]
        );
        // -ss, -us and -is endings are not plurals
        assert_eq!(
            tag("process status analysis"),
            vec![PosTag::Noun, PosTag::Noun, PosTag::Noun]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tag("2024 three"), vec![PosTag::Number, PosTag::Number]);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(tag("quickly"), vec![PosTag::Adverb]);
        assert_eq!(tag("dangerous"), vec![PosTag::Adjective]);
        assert_eq!(tag("walked"), vec![PosTag::Verb]);
        // suffix look-alike nouns are carved out
        assert_eq!(tag("family"), vec![PosTag::Noun]);
        assert_eq!(tag("thing"), vec![PosTag::Noun]);
        // -eed is not a past tense
        assert_eq!(tag("speed"), vec![PosTag::Noun]);
    }

    #[test]
    fn test_modal_forces_verb() {
        let tags = tag("they will transform");
        assert_eq!(tags[2], PosTag::Verb);
        let tags = tag("we should market");
        assert_eq!(tags[2], PosTag::Verb);
    }

    #[test]
    fn test_ing_depends_on_context() {
        // "machine learning" — compound noun
        assert_eq!(tag("machine learning")[1], PosTag::Noun);
        // "the building" — noun after a determiner
        assert_eq!(tag("the building")[1], PosTag::Noun);
        // "are becoming" — progressive verb
        assert_eq!(tag("are becoming")[1], PosTag::Verb);
        // sentence-initial gerund
        assert_eq!(tag("running")[0], PosTag::Verb);
    }

    #[test]
    fn test_third_person_verbs() {
        assert_eq!(tag("she runs")[1], PosTag::Verb);
        assert_eq!(tag("quickly jumps")[1], PosTag::Verb);
        // coordinated with a verb
        assert_eq!(
            tag("she runs and jumps"),
            vec![PosTag::Pronoun, PosTag::Verb, PosTag::Conjunction, PosTag::Verb]
        );
    }

    #[test]
    fn test_plurals_after_nouns_and_possessives() {
        assert_eq!(tag("their apps")[1], PosTag::PluralNoun);
        assert_eq!(tag("the team ships")[2], PosTag::PluralNoun);
        // a noun before the conjunction keeps the plural reading
        assert_eq!(tag("cats and dogs")[2], PosTag::PluralNoun);
    }

    #[test]
    fn test_one_tag_per_token() {
        assert_eq!(tag("").len(), 0);
        assert_eq!(tag("a b c d e").len(), 5);
    }
}
