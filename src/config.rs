// Tue Jan 13 2026 - Alex

use crate::collision::DEFAULT_RESERVED_WORDS;
use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of numeric suffixes tried before a name space counts as exhausted.
    pub max_name_suffix: u32,
    pub suffix_separator: String,
    /// Replaces the built-in keyword list when set.
    pub reserved_words: Vec<String>,
    pub extra_reserved_words: Vec<String>,
    /// Block a type's own name inside its member and function scopes.
    pub reserve_type_name_in_scope: bool,
    pub padding_prefix: String,
    pub bit_padding_prefix: String,
    pub sanitize_identifiers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_name_suffix: 10_000,
            suffix_separator: "_".to_string(),
            reserved_words: DEFAULT_RESERVED_WORDS.iter().map(|w| w.to_string()).collect(),
            extra_reserved_words: Vec::new(),
            reserve_type_name_in_scope: true,
            padding_prefix: "Pad_".to_string(),
            bit_padding_prefix: "BitPad_".to_string(),
            sanitize_identifiers: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate().map_err(GeneratorError::InvalidConfig)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), text)?;
        Ok(())
    }

    pub fn with_max_name_suffix(mut self, max: u32) -> Self {
        self.max_name_suffix = max;
        self
    }

    pub fn with_reserved_words(mut self, words: Vec<String>) -> Self {
        self.reserved_words = words;
        self
    }

    pub fn with_extra_reserved_word(mut self, word: &str) -> Self {
        self.extra_reserved_words.push(word.to_string());
        self
    }

    pub fn with_padding_prefix(mut self, prefix: &str) -> Self {
        self.padding_prefix = prefix.to_string();
        self
    }

    pub fn with_sanitize_identifiers(mut self, sanitize: bool) -> Self {
        self.sanitize_identifiers = sanitize;
        self
    }

    pub fn all_reserved_words(&self) -> impl Iterator<Item = &str> {
        self.reserved_words
            .iter()
            .chain(self.extra_reserved_words.iter())
            .map(String::as_str)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_name_suffix == 0 {
            return Err("max_name_suffix must be greater than 0".to_string());
        }
        if self.padding_prefix.is_empty() || self.bit_padding_prefix.is_empty() {
            return Err("padding prefixes must not be empty".to_string());
        }
        if self.padding_prefix == self.bit_padding_prefix {
            return Err("padding_prefix and bit_padding_prefix must differ".to_string());
        }
        if self.sanitize_identifiers
            && !self
                .suffix_separator
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err("suffix_separator must be a valid identifier fragment".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.all_reserved_words().any(|w| w == "class"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::new().with_max_name_suffix(0).validate().is_err());
        assert!(Config::new().with_padding_prefix("BitPad_").validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "max_name_suffix": 3, "extra_reserved_words": ["Self"] }"#).unwrap();
        assert_eq!(config.max_name_suffix, 3);
        assert_eq!(config.padding_prefix, "Pad_");
        assert!(config.all_reserved_words().any(|w| w == "Self"));
    }
}
