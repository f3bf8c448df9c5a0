//! SearchEngine - pattern registration and ranked search
//!
//! Patterns are tokenized, stripped of stop words and indexed by every
//! contiguous subsequence. A query is cleaned the same way; each of its
//! subsequences is looked up in every selected group, and each posting found
//! adds one hit to its pattern. Results are ordered by descending hit count,
//! ties by ascending pattern id.
//!
//! Longer shared runs of words win without explicit weighting: a shared run of
//! k tokens contributes k(k+1)/2 hits, while k scattered shared words
//! contribute only k.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, StopWordSource};
use crate::index::{GroupId, PatternId, PatternIndex};
use crate::interner::{SharedInterner, Token};
use crate::sequence::TokenSequence;
use crate::stopwords::{StopWords, DEFAULT_LOCALE};
use crate::text::Tokenizer;

/// A ranked search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub pattern_id: PatternId,
    /// Postings shared with the query, summed over the searched groups. Zero for
    /// results of an empty query.
    pub hits: u32,
}

/// Index size summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub groups: usize,
    pub patterns: usize,
    pub index_keys: usize,
    pub postings: usize,
    pub stop_words: usize,
}

/// Token-overlap search engine over grouped patterns.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    tokenizer: Tokenizer,
    stop_words: StopWords,
    index: PatternIndex,
}

impl SearchEngine {
    /// Create an engine using the built-in English stop words.
    pub fn new(interner: SharedInterner) -> Self {
        Self::with_locale(interner, DEFAULT_LOCALE)
    }

    /// Create an engine using the built-in stop words for `locale`.
    pub fn with_locale(interner: SharedInterner, locale: &str) -> Self {
        let stop_words = StopWords::for_locale(&interner, locale);
        Self::with_stop_word_set(interner, stop_words)
    }

    /// Create an engine with an explicit stop-word list. An empty list disables
    /// stop-word filtering.
    pub fn with_stop_words<I, S>(interner: SharedInterner, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = StopWords::from_words(&interner, words);
        Self::with_stop_word_set(interner, stop_words)
    }

    pub fn from_config(interner: SharedInterner, config: &EngineConfig) -> Self {
        match &config.stop_words {
            StopWordSource::Locale(locale) => Self::with_locale(interner, locale),
            StopWordSource::Words(words) => Self::with_stop_words(interner, words),
            StopWordSource::None => Self::with_stop_word_set(interner, StopWords::none()),
        }
    }

    fn with_stop_word_set(interner: SharedInterner, stop_words: StopWords) -> Self {
        tracing::debug!(stop_words = stop_words.len(), "search engine created");
        Self {
            tokenizer: Tokenizer::new(interner),
            stop_words,
            index: PatternIndex::new(),
        }
    }

    /// Drop every registered pattern. Stop words and the interner are kept.
    pub fn clear(&mut self) {
        tracing::debug!(
            groups = self.index.group_count(),
            patterns = self.index.pattern_count(),
            "clearing pattern index"
        );
        self.index.clear();
    }

    /// Index `pattern` under `group_id`.
    ///
    /// Ids are not checked for uniqueness; registering an id again adds more
    /// postings for it.
    pub fn register_pattern(
        &mut self,
        pattern: &TokenSequence,
        group_id: GroupId,
        pattern_id: PatternId,
    ) {
        let cleaned = self.stop_words.remove_from(pattern);
        self.index.insert(&cleaned, group_id, pattern_id);
        tracing::debug!(
            group_id,
            pattern_id,
            tokens = pattern.len(),
            indexed = cleaned.len(),
            "pattern registered"
        );
    }

    /// Tokenize `text`, assigning tokens to new keywords, and register it.
    pub fn register_text(&mut self, text: &str, group_id: GroupId, pattern_id: PatternId) {
        let pattern = self.tokenizer.tokenize(text, true);
        self.register_pattern(&pattern, group_id, pattern_id);
    }

    /// Ranked pattern ids for `query`.
    ///
    /// `group_ids` selects the groups to search; duplicates are ignored and an
    /// empty slice means every group. A query with nothing left after stop-word
    /// removal lists every pattern of the selected groups in ascending group
    /// order, registration order within a group.
    pub fn search(&self, query: &TokenSequence, group_ids: &[GroupId]) -> Vec<PatternId> {
        self.search_with_hits(query, group_ids)
            .into_iter()
            .map(|hit| hit.pattern_id)
            .collect()
    }

    /// Tokenize `text` without assigning new tokens and search for it.
    pub fn search_text(&self, text: &str, group_ids: &[GroupId]) -> Vec<PatternId> {
        let query = self.tokenizer.tokenize(text, false);
        self.search(&query, group_ids)
    }

    /// Like [`search`](Self::search), keeping the hit count of each result.
    pub fn search_with_hits(&self, query: &TokenSequence, group_ids: &[GroupId]) -> Vec<SearchHit> {
        let groups = self.selected_groups(group_ids);
        let cleaned = self.stop_words.remove_from(query);

        let results = if cleaned.is_empty() {
            self.list_patterns(&groups)
        } else {
            rank(self.count_hits(&cleaned, &groups))
        };

        tracing::debug!(
            query_tokens = query.len(),
            searched_tokens = cleaned.len(),
            groups = groups.len(),
            results = results.len(),
            "search complete"
        );
        results
    }

    fn selected_groups(&self, group_ids: &[GroupId]) -> Vec<GroupId> {
        if group_ids.is_empty() {
            self.index.group_ids().collect()
        } else {
            group_ids
                .iter()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }
    }

    fn list_patterns(&self, groups: &[GroupId]) -> Vec<SearchHit> {
        groups
            .iter()
            .filter_map(|&group_id| self.index.group(group_id))
            .flat_map(|group| group.pattern_ids())
            .map(|&pattern_id| SearchHit {
                pattern_id,
                hits: 0,
            })
            .collect()
    }

    fn count_hits(&self, cleaned: &TokenSequence, groups: &[GroupId]) -> AHashMap<PatternId, u32> {
        let mut hits: AHashMap<PatternId, u32> = AHashMap::new();
        for &group_id in groups {
            let Some(group) = self.index.group(group_id) else {
                tracing::trace!(group_id, "group not registered, skipping");
                continue;
            };
            cleaned.for_each_subsequence(|sub| {
                for &pattern_id in group.lookup(sub) {
                    *hits.entry(pattern_id).or_insert(0) += 1;
                }
            });
            tracing::trace!(group_id, matched = hits.len(), "group searched");
        }
        hits
    }

    /// Look up (and optionally assign) the token for `keyword`.
    pub fn token_for_keyword(&self, keyword: &str, assign_new_token: bool) -> Option<Token> {
        self.tokenizer.interner().token_for(keyword, assign_new_token)
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn interner(&self) -> &SharedInterner {
        self.tokenizer.interner()
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn index(&self) -> &PatternIndex {
        &self.index
    }

    pub fn stats(&self) -> EngineStats {
        let (index_keys, postings) = self
            .index
            .groups()
            .fold((0, 0), |(keys, postings), (_, group)| {
                (keys + group.key_count(), postings + group.entry_count())
            });
        EngineStats {
            groups: self.index.group_count(),
            patterns: self.index.pattern_count(),
            index_keys,
            postings,
            stop_words: self.stop_words.len(),
        }
    }
}

/// Order by descending hit count, then ascending pattern id.
fn rank(hits: AHashMap<PatternId, u32>) -> Vec<SearchHit> {
    let mut ranked: Vec<SearchHit> = hits
        .into_iter()
        .filter(|&(_, hits)| hits > 0)
        .map(|(pattern_id, hits)| SearchHit { pattern_id, hits })
        .collect();
    ranked.sort_unstable_by_key(|hit| (Reverse(hit.hits), hit.pattern_id));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_without_stop_words() -> SearchEngine {
        SearchEngine::with_stop_words(SharedInterner::new(), Vec::<String>::new())
    }

    #[test]
    fn test_rank_orders_by_hits_then_id() {
        let mut hits = AHashMap::new();
        hits.insert(8, 2);
        hits.insert(4, 1);
        hits.insert(2, 3);
        hits.insert(0, 3);
        hits.insert(6, 1);
        let ids: Vec<PatternId> = rank(hits).into_iter().map(|h| h.pattern_id).collect();
        assert_eq!(ids, vec![0, 2, 8, 4, 6]);
    }

    #[test]
    fn test_longer_overlap_outranks_scattered_words() {
        let mut engine = engine_without_stop_words();
        engine.register_text("chamber door", 0, 1);
        engine.register_text("door of the chamber", 0, 2);
        let hits = engine.search_with_hits(&engine.tokenizer().tokenize("chamber door", false), &[]);
        assert_eq!(
            hits,
            vec![
                SearchHit { pattern_id: 1, hits: 3 },
                SearchHit { pattern_id: 2, hits: 2 },
            ]
        );
    }

    #[test]
    fn test_reregistration_doubles_hits() {
        let mut engine = engine_without_stop_words();
        engine.register_text("gently rapping", 1, 3);
        let once = engine.search_with_hits(&engine.tokenizer().tokenize("rapping", false), &[]);
        engine.register_text("gently rapping", 1, 3);
        let twice = engine.search_with_hits(&engine.tokenizer().tokenize("rapping", false), &[]);
        assert_eq!(once[0].hits * 2, twice[0].hits);
    }

    #[test]
    fn test_hits_accumulate_across_groups() {
        let mut engine = engine_without_stop_words();
        engine.register_text("ghost upon the floor", 1, 5);
        engine.register_text("ghost upon the floor", 2, 5);
        let query = engine.tokenizer().tokenize("floor", false);
        assert_eq!(engine.search_with_hits(&query, &[1])[0].hits, 1);
        assert_eq!(engine.search_with_hits(&query, &[1, 2])[0].hits, 2);
        // Duplicate group ids are searched once.
        assert_eq!(engine.search_with_hits(&query, &[2, 1, 2])[0].hits, 2);
    }

    #[test]
    fn test_unknown_groups_and_words_yield_nothing() {
        let mut engine = engine_without_stop_words();
        engine.register_text("nevermore", 1, 0);
        assert!(engine.search_text("nevermore", &[9]).is_empty());
        assert!(engine.search_text("lenore", &[]).is_empty());
        assert!(engine.search(&TokenSequence::new(), &[9]).is_empty());
    }

    #[test]
    fn test_search_text_does_not_grow_interner() {
        let mut engine = engine_without_stop_words();
        engine.register_text("silken sad uncertain", 3, 12);
        let before = engine.interner().len();
        engine.search_text("purple curtain", &[]);
        assert_eq!(engine.interner().len(), before);
    }

    #[test]
    fn test_clear_keeps_stop_words_and_interner() {
        let interner = SharedInterner::new();
        let mut engine = SearchEngine::with_stop_words(interner.clone(), ["the"]);
        engine.register_text("the bleak december", 2, 6);
        let keywords = interner.len();
        engine.clear();
        assert!(engine.search(&TokenSequence::new(), &[]).is_empty());
        assert_eq!(engine.stats().patterns, 0);
        assert_eq!(engine.stop_words().len(), 1);
        assert_eq!(interner.len(), keywords);

        engine.register_text("the bleak december", 2, 6);
        assert_eq!(engine.search_text("december", &[]), vec![6]);
    }

    #[test]
    fn test_token_for_keyword() {
        let engine = engine_without_stop_words();
        assert_eq!(engine.token_for_keyword("Raven", false), None);
        let token = engine.token_for_keyword("Raven", true).unwrap();
        assert_eq!(engine.token_for_keyword("raven", false), Some(token));
    }

    #[test]
    fn test_from_config() {
        let interner = SharedInterner::new();
        let engine =
            SearchEngine::from_config(interner.clone(), &EngineConfig::with_stop_words(["nothing"]));
        assert_eq!(engine.stop_words().len(), 1);

        let engine = SearchEngine::from_config(interner.clone(), &EngineConfig::default());
        assert_eq!(
            engine.stop_words().len(),
            crate::stopwords::ENGLISH_STOP_WORDS.len()
        );

        let engine = SearchEngine::from_config(interner, &EngineConfig::without_stop_words());
        assert!(engine.stop_words().is_empty());
    }

    #[test]
    fn test_stats() {
        let mut engine = engine_without_stop_words();
        engine.register_text("rapping rapping", 1, 3);
        engine.register_text("chamber door", 2, 4);
        let stats = engine.stats();
        assert_eq!(stats.groups, 2);
        assert_eq!(stats.patterns, 2);
        assert_eq!(stats.postings, 6);
        assert_eq!(stats.index_keys, 5);
        assert_eq!(stats.stop_words, 0);
    }
}
