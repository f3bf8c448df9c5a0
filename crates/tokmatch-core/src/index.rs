//! Per-group subsequence index
//!
//! Every registered pattern contributes one posting for each of its contiguous,
//! non-empty subsequences. Postings keep insertion order and are never
//! deduplicated: registering the same pattern twice doubles its postings.

use std::collections::btree_map;
use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::sequence::TokenSequence;

/// Caller-assigned pattern identifier.
pub type PatternId = u16;

/// Caller-assigned group identifier.
pub type GroupId = u8;

/// Reserved pattern identifier meaning "no pattern".
pub const INVALID_PATTERN_ID: PatternId = PatternId::MAX;

/// Reserved group identifier meaning "no group".
pub const INVALID_GROUP_ID: GroupId = GroupId::MAX;

/// Index for a single group.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    postings: AHashMap<TokenSequence, Vec<PatternId>>,
    pattern_ids: Vec<PatternId>,
    entry_count: usize,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pattern_id` under every contiguous subsequence of `cleaned`, then
    /// append it to the group's registration list.
    pub fn insert(&mut self, cleaned: &TokenSequence, pattern_id: PatternId) {
        let postings = &mut self.postings;
        let mut added = 0;
        cleaned.for_each_subsequence(|sub| {
            postings.entry(*sub).or_default().push(pattern_id);
            added += 1;
        });
        self.entry_count += added;
        self.pattern_ids.push(pattern_id);
    }

    /// Pattern ids posted under exactly `key`, in insertion order.
    pub fn lookup(&self, key: &TokenSequence) -> &[PatternId] {
        self.postings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every pattern id registered in this group, in registration order.
    pub fn pattern_ids(&self) -> &[PatternId] {
        &self.pattern_ids
    }

    /// Total postings across all keys.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Number of distinct subsequence keys.
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }
}

/// Group id to [`GroupIndex`]; iteration is always in ascending group order.
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    groups: BTreeMap<GroupId, GroupIndex>,
}

impl PatternIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cleaned: &TokenSequence, group_id: GroupId, pattern_id: PatternId) {
        self.groups
            .entry(group_id)
            .or_default()
            .insert(cleaned, pattern_id);
    }

    pub fn group(&self, group_id: GroupId) -> Option<&GroupIndex> {
        self.groups.get(&group_id)
    }

    pub fn groups(&self) -> btree_map::Iter<'_, GroupId, GroupIndex> {
        self.groups.iter()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups.keys().copied()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.groups.values().map(|g| g.pattern_ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Token;

    fn seq(values: &[u16]) -> TokenSequence {
        values.iter().copied().map(Token::new).collect()
    }

    #[test]
    fn test_registers_every_contiguous_subsequence() {
        let mut group = GroupIndex::new();
        group.insert(&seq(&[1, 2, 3, 4]), 7);
        assert_eq!(group.entry_count(), 10);
        assert_eq!(group.key_count(), 10);
        assert_eq!(group.lookup(&seq(&[2, 3])), &[7]);
        assert_eq!(group.lookup(&seq(&[1, 2, 3, 4])), &[7]);
        // Not contiguous.
        assert!(group.lookup(&seq(&[1, 3])).is_empty());
        // Wrong order.
        assert!(group.lookup(&seq(&[2, 1])).is_empty());
    }

    #[test]
    fn test_repeated_content_shares_keys() {
        let mut group = GroupIndex::new();
        // "rapping rapping" -> [5], [5], [5, 5]
        group.insert(&seq(&[5, 5]), 3);
        assert_eq!(group.entry_count(), 3);
        assert_eq!(group.key_count(), 2);
        assert_eq!(group.lookup(&seq(&[5])), &[3, 3]);
    }

    #[test]
    fn test_reregistration_is_not_deduplicated() {
        let mut group = GroupIndex::new();
        group.insert(&seq(&[1, 2]), 4);
        group.insert(&seq(&[1, 2]), 4);
        assert_eq!(group.lookup(&seq(&[1, 2])), &[4, 4]);
        assert_eq!(group.pattern_ids(), &[4, 4]);
    }

    #[test]
    fn test_empty_pattern_is_still_listed() {
        let mut index = PatternIndex::new();
        index.insert(&TokenSequence::new(), 2, 9);
        let group = index.group(2).unwrap();
        assert_eq!(group.entry_count(), 0);
        assert_eq!(group.pattern_ids(), &[9]);
    }

    #[test]
    fn test_groups_iterate_in_ascending_order() {
        let mut index = PatternIndex::new();
        index.insert(&seq(&[1]), 3, 0);
        index.insert(&seq(&[1]), 1, 1);
        index.insert(&seq(&[1]), 2, 2);
        assert_eq!(index.group_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(index.pattern_count(), 3);
        index.clear();
        assert!(index.is_empty());
        assert!(index.group(1).is_none());
    }
}
