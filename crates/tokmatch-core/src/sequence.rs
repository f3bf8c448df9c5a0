//! Bounded token sequences
//!
//! [`TokenSequence`] is the value type behind tokenized patterns, queries and
//! index keys. It stores up to [`TokenSequence::CAPACITY`] tokens inline, so
//! building the O(n²) subsequence keys during registration and search never
//! touches the heap.
//!
//! Ordering compares length first and content second: every shorter sequence
//! sorts before every longer one. Hashing xors the per-token hashes, which makes
//! it insensitive to order while equality is not; permutations share a bucket
//! and are told apart by `Eq`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::CapacityError;
use crate::interner::Token;

const HASH_SEED: u64 = 0x1234_5678;

/// Fibonacci-hashing mix of a single token.
#[inline]
fn token_hash(token: Token) -> u64 {
    (u64::from(token.value()) ^ 0xA5A5).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Fixed-capacity ordered sequence of tokens.
#[derive(Clone, Copy)]
pub struct TokenSequence {
    tokens: [Token; TokenSequence::CAPACITY],
    len: u8,
}

impl TokenSequence {
    /// Maximum number of tokens a sequence can hold.
    pub const CAPACITY: usize = 31;

    pub const fn new() -> Self {
        Self {
            tokens: [Token::new(0); Self::CAPACITY],
            len: 0,
        }
    }

    /// Build a sequence from a slice, failing if it is longer than the capacity.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self, CapacityError> {
        if tokens.len() > Self::CAPACITY {
            return Err(CapacityError {
                capacity: Self::CAPACITY,
            });
        }
        let mut seq = Self::new();
        seq.tokens[..tokens.len()].copy_from_slice(tokens);
        seq.len = tokens.len() as u8;
        Ok(seq)
    }

    /// Append `token`. A full sequence is left unchanged and reports an error.
    pub fn try_push(&mut self, token: Token) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError {
                capacity: Self::CAPACITY,
            });
        }
        self.tokens[self.len as usize] = token;
        self.len += 1;
        Ok(())
    }

    /// Append `token`, returning `false` if the sequence was already full.
    pub fn push(&mut self, token: Token) -> bool {
        self.try_push(token).is_ok()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len as usize == Self::CAPACITY
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens[..self.len as usize]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens().iter()
    }

    pub fn to_vec(&self) -> Vec<Token> {
        self.tokens().to_vec()
    }

    /// Keep only tokens matching `keep`, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(Token) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len as usize {
            let token = self.tokens[read];
            if keep(token) {
                self.tokens[write] = token;
                write += 1;
            }
        }
        for slot in &mut self.tokens[write..self.len as usize] {
            *slot = Token::new(0);
        }
        self.len = write as u8;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Visit every contiguous, non-empty subsequence, grouped by start offset
    /// and growing one token at a time.
    ///
    /// A sequence of length n yields exactly n(n+1)/2 subsequences.
    pub fn for_each_subsequence<F>(&self, mut visit: F)
    where
        F: FnMut(&TokenSequence),
    {
        let tokens = self.tokens();
        for left in 0..tokens.len() {
            let mut sub = TokenSequence::new();
            for &token in &tokens[left..] {
                sub.tokens[sub.len as usize] = token;
                sub.len += 1;
                visit(&sub);
            }
        }
    }
}

impl Default for TokenSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TokenSequence {
    fn eq(&self, other: &Self) -> bool {
        self.tokens() == other.tokens()
    }
}

impl Eq for TokenSequence {}

impl Ord for TokenSequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| self.tokens().cmp(other.tokens()))
    }
}

impl PartialOrd for TokenSequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for TokenSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self
            .iter()
            .fold(HASH_SEED, |acc, &token| acc ^ token_hash(token));
        state.write_u64(combined);
    }
}

impl fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens()).finish()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{token}")?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects up to [`TokenSequence::CAPACITY`] tokens; the rest are dropped.
impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut seq = TokenSequence::new();
        seq.extend(iter);
        seq
    }
}

impl Extend<Token> for TokenSequence {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        for token in iter {
            if !self.push(token) {
                break;
            }
        }
    }
}
