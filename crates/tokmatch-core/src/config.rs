//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stopwords::DEFAULT_LOCALE;

/// Where an engine's stop words come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWordSource {
    /// Built-in list for a locale tag
    Locale(String),
    /// Explicit word list
    Words(Vec<String>),
    /// No stop words
    None,
}

impl Default for StopWordSource {
    fn default() -> Self {
        StopWordSource::Locale(DEFAULT_LOCALE.to_string())
    }
}

/// Search engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stop_words: StopWordSource,
}

impl EngineConfig {
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            stop_words: StopWordSource::Locale(locale.into()),
        }
    }

    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: StopWordSource::Words(words.into_iter().map(Into::into).collect()),
        }
    }

    pub fn without_stop_words() -> Self {
        Self {
            stop_words: StopWordSource::None,
        }
    }

    /// Parse a JSON configuration document.
    ///
    /// ```json
    /// { "stop_words": { "words": ["the", "a"] } }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match &self.stop_words {
            StopWordSource::Locale(locale) if locale.trim().is_empty() => {
                Err(Error::Config("stop word locale must not be empty".to_string()))
            }
            StopWordSource::Words(words) => match words.iter().find(|w| w.trim().is_empty()) {
                Some(_) => Err(Error::Config("stop words must not be blank".to_string())),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}
