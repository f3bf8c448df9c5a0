//! tokmatch Core Engine
//!
//! Approximate phrase lookup by exact token overlap. Short text patterns are
//! registered under caller-chosen group and pattern ids; a query returns the
//! ids of patterns sharing the most contiguous word runs with it.
//!
//! Matching is exact per word. Tolerance comes only from extra, missing or
//! reordered surrounding words; there is no edit distance or phonetic matching.
//!
//! # Example
//!
//! ```rust
//! use tokmatch_core::{SearchEngine, SharedInterner};
//!
//! let interner = SharedInterner::new();
//! let mut engine = SearchEngine::with_stop_words(interner, Vec::<String>::new());
//! engine.register_text("Once upon a midnight dreary", 1, 0);
//! engine.register_text("Tapping at my chamber door", 1, 1);
//!
//! assert_eq!(engine.search_text("my chamber door", &[]), vec![1]);
//! assert_eq!(engine.search_text("", &[]), vec![0, 1]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod interner;
pub mod sequence;
pub mod stopwords;
pub mod text;

// Re-export main types at crate root
pub use config::{EngineConfig, StopWordSource};
pub use engine::{EngineStats, SearchEngine, SearchHit};
pub use error::{CapacityError, Error, Result};
pub use index::{GroupId, GroupIndex, PatternId, PatternIndex, INVALID_GROUP_ID, INVALID_PATTERN_ID};
pub use interner::{KeywordInterner, SharedInterner, Token};
pub use sequence::TokenSequence;
pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use text::{TokenizedString, Tokenizer};
