//! Keyword interning
//!
//! Maps case-folded keywords to small consecutive [`Token`] values and back.
//! Tokens are assigned from 0 upward in first-seen order and are never reused,
//! so a token stays valid for as long as the interner that issued it.
//!
//! Interners are shared through [`SharedInterner`] handles rather than living in
//! global state: every tokenizer and engine built from clones of one handle agrees
//! on token numbering, while separately created handles are fully isolated.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};

/// Interned keyword identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u16);

impl Token {
    /// Reserved "not interned" value. Appears inside sequences produced without
    /// token assignment, standing in for unknown words.
    pub const INVALID: Token = Token(u16::MAX);

    /// Number of distinct keywords an interner can hold.
    pub const CAPACITY: usize = u16::MAX as usize;

    pub const fn new(value: u16) -> Self {
        Token(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != u16::MAX
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Token({})", self.0)
        } else {
            write!(f, "Token(INVALID)")
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "?")
        }
    }
}

impl From<u16> for Token {
    fn from(value: u16) -> Self {
        Token(value)
    }
}

/// Append-only bidirectional keyword table.
#[derive(Debug, Default, Clone)]
pub struct KeywordInterner {
    tokens_by_keyword: AHashMap<String, Token>,
    keywords_by_token: Vec<String>,
}

impl KeywordInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `keyword` case-insensitively, assigning the next token when it is
    /// unknown and `assign` is set.
    ///
    /// Returns `None` when the keyword is unknown and `assign` is false, or when
    /// the token space is exhausted.
    pub fn token_for(&mut self, keyword: &str, assign: bool) -> Option<Token> {
        if assign {
            self.intern(keyword).ok()
        } else {
            self.lookup(keyword)
        }
    }

    /// Intern `keyword`, returning its existing token or assigning a new one.
    pub fn intern(&mut self, keyword: &str) -> Result<Token> {
        let lower = keyword.to_lowercase();
        if let Some(&token) = self.tokens_by_keyword.get(&lower) {
            return Ok(token);
        }

        let next = self.keywords_by_token.len();
        if next >= Token::CAPACITY {
            tracing::warn!(keyword = %lower, "keyword token space exhausted");
            return Err(Error::TokenSpaceExhausted);
        }

        let token = Token(next as u16);
        self.keywords_by_token.push(lower.clone());
        self.tokens_by_keyword.insert(lower, token);
        Ok(token)
    }

    /// Look up `keyword` without assigning.
    pub fn lookup(&self, keyword: &str) -> Option<Token> {
        self.tokens_by_keyword.get(&keyword.to_lowercase()).copied()
    }

    /// Lower-cased keyword for `token`, if it was issued by this interner.
    pub fn keyword_for(&self, token: Token) -> Option<&str> {
        self.keywords_by_token
            .get(token.0 as usize)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords_by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords_by_token.is_empty()
    }
}

/// Cloneable handle to a [`KeywordInterner`] shared by tokenizers and engines.
#[derive(Debug, Clone, Default)]
pub struct SharedInterner {
    inner: Arc<RwLock<KeywordInterner>>,
}

impl SharedInterner {
    /// Create a handle to a fresh, empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`KeywordInterner::token_for`].
    pub fn token_for(&self, keyword: &str, assign: bool) -> Option<Token> {
        if !assign {
            return self.inner.read().lookup(keyword);
        }
        self.inner.write().token_for(keyword, true)
    }

    pub fn intern(&self, keyword: &str) -> Result<Token> {
        self.inner.write().intern(keyword)
    }

    pub fn keyword_for(&self, token: Token) -> Option<String> {
        self.inner.read().keyword_for(token).map(str::to_owned)
    }

    /// Borrow the interner for a batch of lookups under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, KeywordInterner> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, KeywordInterner> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// True when both handles point at the same interner.
    pub fn same_as(&self, other: &SharedInterner) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
