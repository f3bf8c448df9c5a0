//! # tokmatch command line support
//!
//! - **patterns**: pattern file parsing and the loaded [`Catalog`](patterns::Catalog)
//! - **error**: CLI error type
//! - **logging**: tracing-subscriber setup
//!
//! Engine configuration files are JSON documents understood by
//! [`EngineConfig`]:
//!
//! ```json
//! { "stop_words": { "locale": "en" } }
//! ```

pub mod error;
pub mod logging;
pub mod patterns;

use std::fs;
use std::path::Path;

use tokmatch_core::EngineConfig;

pub use error::{Error, Result};
pub use patterns::{parse_patterns, Catalog, PatternEntry};

/// Read and validate an engine configuration file.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = fs::read_to_string(path)?;
    let config = EngineConfig::from_json_str(&json)?;
    tracing::debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}
