//! Stop words
//!
//! Keywords dropped from patterns before indexing and from queries before
//! searching. A [`StopWords`] set is resolved to tokens once, when an engine is
//! built, and never changes afterwards.

use ahash::AHashSet;

use crate::interner::{SharedInterner, Token};
use crate::sequence::TokenSequence;

/// Locale tag of the built-in list.
pub const DEFAULT_LOCALE: &str = "en";

/// English stop words, after the Google stop word list.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with",
    "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Built-in word list for `locale`. Only English ships; every other tag falls
/// back to it.
pub fn builtin_list(locale: &str) -> &'static [&'static str] {
    match locale {
        DEFAULT_LOCALE => ENGLISH_STOP_WORDS,
        other => {
            tracing::debug!(locale = other, "no stop word list for locale, using en");
            ENGLISH_STOP_WORDS
        }
    }
}

/// Immutable set of stop-word tokens.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    tokens: AHashSet<Token>,
}

impl StopWords {
    /// No stop words; every token is indexed and searched.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_locale(interner: &SharedInterner, locale: &str) -> Self {
        Self::from_words(interner, builtin_list(locale).iter().copied())
    }

    /// Intern each word (assigning tokens as needed) and collect the results.
    pub fn from_words<I, S>(interner: &SharedInterner, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = words
            .into_iter()
            .filter_map(|word| interner.token_for(word.as_ref(), true))
            .collect();
        Self { tokens }
    }

    pub fn contains(&self, token: Token) -> bool {
        self.tokens.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Copy of `pattern` with stop-word tokens removed, order preserved.
    pub fn remove_from(&self, pattern: &TokenSequence) -> TokenSequence {
        let mut cleaned = *pattern;
        if !self.tokens.is_empty() {
            cleaned.retain(|token| !self.contains(token));
        }
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tokenizer;

    #[test]
    fn test_english_list_is_interned() {
        let interner = SharedInterner::new();
        let stop_words = StopWords::for_locale(&interner, "en");
        assert_eq!(stop_words.len(), ENGLISH_STOP_WORDS.len());
        assert_eq!(interner.len(), ENGLISH_STOP_WORDS.len());
        let the = interner.token_for("THE", false).unwrap();
        assert!(stop_words.contains(the));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let interner = SharedInterner::new();
        let fr = StopWords::for_locale(&interner, "fr");
        let en = StopWords::for_locale(&interner, "en");
        assert_eq!(fr.len(), en.len());
        assert_eq!(fr.tokens, en.tokens);
    }

    #[test]
    fn test_remove_from_preserves_order() {
        let interner = SharedInterner::new();
        let stop_words = StopWords::from_words(&interner, ["the", "of"]);
        let tokenizer = Tokenizer::new(interner.clone());
        let pattern = tokenizer.tokenize("The rare and radiant maiden of the angels", true);
        let cleaned = stop_words.remove_from(&pattern);
        assert_eq!(
            tokenizer.approximate_string(&cleaned),
            "rare and radiant maiden angels"
        );
    }

    #[test]
    fn test_none_leaves_pattern_untouched() {
        let interner = SharedInterner::new();
        let tokenizer = Tokenizer::new(interner);
        let pattern = tokenizer.tokenize("the raven", true);
        assert_eq!(StopWords::none().remove_from(&pattern), pattern);
    }
}
