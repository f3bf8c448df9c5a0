//! Text tokenization
//!
//! Splits free text into keywords and interns them into a [`TokenSequence`].
//!
//! Scanning rules, applied code point by code point:
//!
//! - `.` ends the pending keyword and becomes a token of its own
//! - whitespace and any other punctuation (apostrophe excluded) ends the pending
//!   keyword and is dropped
//! - everything else, apostrophes included, extends the pending keyword
//!
//! Keywords keep their original case until they reach the interner, which folds
//! them. Output is capped at [`TokenSequence::CAPACITY`] tokens; anything past
//! that is dropped without being interned.

use std::ops::Deref;

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::interner::{KeywordInterner, SharedInterner, Token};
use crate::sequence::TokenSequence;

/// True for characters in any Unicode punctuation category (Pc, Pd, Ps, Pe, Pi, Pf, Po).
pub fn is_punctuation(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Punctuation
}

pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Converts text into token sequences against a shared interner.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    interner: SharedInterner,
}

impl Tokenizer {
    pub fn new(interner: SharedInterner) -> Self {
        Self { interner }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Tokenize `text`.
    ///
    /// With `assign_new_tokens` unset, unknown keywords become [`Token::INVALID`]
    /// so positions in the sequence still line up with words in the text.
    pub fn tokenize(&self, text: &str, assign_new_tokens: bool) -> TokenSequence {
        if assign_new_tokens {
            let mut interner = self.interner.write();
            scan(text, |keyword| {
                interner.token_for(keyword, true).unwrap_or(Token::INVALID)
            })
        } else {
            let interner = self.interner.read();
            scan(text, |keyword| lookup_or_invalid(&interner, keyword))
        }
    }

    /// Rebuild approximate text from `tokens`: lower-cased keywords joined by
    /// single spaces. Punctuation other than `.` is lost and unknown tokens
    /// render as empty words.
    pub fn approximate_string(&self, tokens: &TokenSequence) -> String {
        let interner = self.interner.read();
        tokens
            .iter()
            .map(|&token| interner.keyword_for(token).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn lookup_or_invalid(interner: &KeywordInterner, keyword: &str) -> Token {
    interner.lookup(keyword).unwrap_or(Token::INVALID)
}

fn scan<F>(text: &str, mut resolve: F) -> TokenSequence
where
    F: FnMut(&str) -> Token,
{
    let mut result = TokenSequence::new();
    let mut keyword = String::new();

    for c in text.chars() {
        if c == '.' {
            if !flush(&mut keyword, &mut result, &mut resolve) || result.is_full() {
                return truncated(result, text);
            }
            result.push(resolve("."));
        } else if (is_punctuation(c) && c != '\'') || is_space(c) {
            if !flush(&mut keyword, &mut result, &mut resolve) {
                return truncated(result, text);
            }
        } else {
            keyword.push(c);
        }
    }

    if !flush(&mut keyword, &mut result, &mut resolve) {
        return truncated(result, text);
    }
    result
}

/// Emit the pending keyword, if any. Returns `false` once the sequence is full.
fn flush<F>(keyword: &mut String, result: &mut TokenSequence, resolve: &mut F) -> bool
where
    F: FnMut(&str) -> Token,
{
    if keyword.is_empty() {
        return true;
    }
    if result.is_full() {
        return false;
    }
    let pushed = result.push(resolve(keyword));
    keyword.clear();
    pushed
}

fn truncated(result: TokenSequence, text: &str) -> TokenSequence {
    tracing::trace!(
        capacity = TokenSequence::CAPACITY,
        text_len = text.len(),
        "tokenized text truncated"
    );
    result
}

/// A [`TokenSequence`] produced from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenizedString(TokenSequence);

impl TokenizedString {
    pub fn new(interner: &SharedInterner, text: &str, assign_new_tokens: bool) -> Self {
        Self(Tokenizer::new(interner.clone()).tokenize(text, assign_new_tokens))
    }

    pub fn approximate_string(&self, interner: &SharedInterner) -> String {
        Tokenizer::new(interner.clone()).approximate_string(&self.0)
    }

    pub fn into_inner(self) -> TokenSequence {
        self.0
    }
}

impl Deref for TokenizedString {
    type Target = TokenSequence;

    fn deref(&self) -> &TokenSequence {
        &self.0
    }
}

impl From<TokenSequence> for TokenizedString {
    fn from(seq: TokenSequence) -> Self {
        Self(seq)
    }
}

impl From<TokenizedString> for TokenSequence {
    fn from(s: TokenizedString) -> Self {
        s.0
    }
}
