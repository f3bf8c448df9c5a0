//! Pattern files
//!
//! One pattern per line, tab separated:
//!
//! ```text
//! # group  id  text
//! 1	0	Once upon a midnight dreary, while I pondered, weak and weary,
//! 1	1	Over many a quaint and curious volume of forgotten lore
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeMap;
use std::io::BufRead;

use tokmatch_core::{GroupId, PatternId, SearchEngine, INVALID_GROUP_ID, INVALID_PATTERN_ID};

use crate::error::{Error, Result};

/// A single parsed pattern line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub group_id: GroupId,
    pub pattern_id: PatternId,
    pub text: String,
}

/// Parse every pattern in `reader`.
pub fn parse_patterns<R: BufRead>(reader: R) -> Result<Vec<PatternEntry>> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(entry) = parse_line(&line, idx + 1)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_line(line: &str, line_no: usize) -> Result<Option<PatternEntry>> {
    let trimmed = line.trim_end_matches('\r');
    if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
        return Ok(None);
    }

    let mut fields = trimmed.splitn(3, '\t');
    let (Some(group), Some(id), Some(text)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(pattern_error(line_no, "expected <group>\\t<id>\\t<text>"));
    };

    let group_id: GroupId = group
        .trim()
        .parse()
        .map_err(|_| pattern_error(line_no, format!("invalid group id '{}'", group.trim())))?;
    if group_id == INVALID_GROUP_ID {
        return Err(pattern_error(line_no, format!("group id {group_id} is reserved")));
    }

    let pattern_id: PatternId = id
        .trim()
        .parse()
        .map_err(|_| pattern_error(line_no, format!("invalid pattern id '{}'", id.trim())))?;
    if pattern_id == INVALID_PATTERN_ID {
        return Err(pattern_error(line_no, format!("pattern id {pattern_id} is reserved")));
    }

    Ok(Some(PatternEntry {
        group_id,
        pattern_id,
        text: text.to_string(),
    }))
}

fn pattern_error(line: usize, message: impl Into<String>) -> Error {
    Error::Pattern {
        line,
        message: message.into(),
    }
}

/// Registered patterns plus their source text, for printing results.
#[derive(Debug)]
pub struct Catalog {
    engine: SearchEngine,
    texts: BTreeMap<PatternId, String>,
}

impl Catalog {
    /// Register `entries` into `engine` in file order.
    pub fn load(mut engine: SearchEngine, entries: Vec<PatternEntry>) -> Self {
        let mut texts = BTreeMap::new();
        for entry in entries {
            engine.register_text(&entry.text, entry.group_id, entry.pattern_id);
            texts.entry(entry.pattern_id).or_insert(entry.text);
        }
        tracing::info!(
            patterns = texts.len(),
            groups = engine.index().group_count(),
            "patterns loaded"
        );
        Self { engine, texts }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Text first registered under `pattern_id`.
    pub fn text(&self, pattern_id: PatternId) -> Option<&str> {
        self.texts.get(&pattern_id).map(String::as_str)
    }
}
