//! Bidifix configuration system.
//!
//! Centralized settings for the annotation engine, loaded from
//! `bidifix.toml` with environment-variable overrides on top. Every field
//! has a default matching the built-in behavior, so an absent file, an
//! absent section or an absent key never changes what the engine does.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration from a file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure for bidifix.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BidifixConfig {
    /// Annotator behavior switches
    pub annotator: AnnotatorSettings,
    /// Pass trigger timings
    pub scheduler: SchedulerSettings,
    /// Selector list overrides
    pub selectors: SelectorSettings,
}

/// Annotator behavior switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorSettings {
    /// Style input fields from their current value and reclassify live on
    /// input events.
    pub input_fields: bool,
    /// Apply explicit LTR styling to pure-English samples instead of
    /// leaving them untouched.
    pub style_plain_ltr: bool,
}

/// Pass trigger timings, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Quiet window after a relevant DOM mutation before a pass runs.
    pub mutation_debounce_ms: u64,
    /// Cadence of the periodic full rescan.
    pub rescan_interval_ms: u64,
    /// Cadence of the page-path poll for client-side navigation.
    pub nav_poll_interval_ms: u64,
    /// Delay of the one-shot catch-up pass after load.
    pub catch_up_delay_ms: u64,
    /// Settle time after a detected navigation before re-annotating.
    pub nav_settle_delay_ms: u64,
}

/// Selector list overrides. An empty list keeps the builtin selectors for
/// that category; a non-empty list replaces them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectorSettings {
    /// Message-container selectors
    pub messages: Vec<String>,
    /// Input-field selectors
    pub fields: Vec<String>,
    /// Standalone sweep selectors
    pub sweep: Vec<String>,
}

impl Default for AnnotatorSettings {
    fn default() -> Self {
        Self {
            input_fields: true,
            style_plain_ltr: false,
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            mutation_debounce_ms: 100,
            rescan_interval_ms: 2000,
            nav_poll_interval_ms: 1000,
            catch_up_delay_ms: 1000,
            nav_settle_delay_ms: 1000,
        }
    }
}

impl BidifixConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `bidifix.toml` in the current directory, or
    /// return the default configuration if the file is missing or invalid.
    pub fn load_or_default() -> Self {
        Self::load_from_file("bidifix.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables.
    ///
    /// Environment variables take precedence over configuration file
    /// values, which allows temporary overrides without editing the file.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("BIDIFIX_INPUT_FIELDS") {
            self.annotator.input_fields = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("BIDIFIX_STYLE_PLAIN_LTR") {
            self.annotator.style_plain_ltr = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("BIDIFIX_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.scheduler.mutation_debounce_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("BIDIFIX_RESCAN_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.scheduler.rescan_interval_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("BIDIFIX_NAV_POLL_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.scheduler.nav_poll_interval_ms = ms;
            }
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// The recommended entry point:
    /// 1. Load from `$BIDIFIX_CONFIG` if set, else `bidifix.toml` (or use
    ///    defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = match std::env::var("BIDIFIX_CONFIG") {
            Ok(path) => Self::load_from_file(&path).unwrap_or_default(),
            Err(_) => Self::load_or_default(),
        };
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BidifixConfig::default();
        assert!(config.annotator.input_fields);
        assert!(!config.annotator.style_plain_ltr);
        assert_eq!(config.scheduler.mutation_debounce_ms, 100);
        assert_eq!(config.scheduler.rescan_interval_ms, 2000);
        assert_eq!(config.scheduler.nav_poll_interval_ms, 1000);
        assert!(config.selectors.messages.is_empty());
    }

    #[test]
    fn test_toml_serialization() {
        let config = BidifixConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: BidifixConfig = toml::from_str(&toml_str).unwrap();
        assert!(parsed.annotator.input_fields);
        assert_eq!(parsed.scheduler.catch_up_delay_ms, 1000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: BidifixConfig = toml::from_str(
            r#"
            [annotator]
            style_plain_ltr = true

            [selectors]
            messages = ["div.turn"]
            "#,
        )
        .unwrap();
        assert!(parsed.annotator.style_plain_ltr);
        assert!(parsed.annotator.input_fields, "untouched keys keep defaults");
        assert_eq!(parsed.scheduler.mutation_debounce_ms, 100);
        assert_eq!(parsed.selectors.messages, vec!["div.turn".to_string()]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scheduler]\nrescan_interval_ms = 5000").unwrap();

        let config = BidifixConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.scheduler.rescan_interval_ms, 5000);
        assert_eq!(config.scheduler.mutation_debounce_ms, 100);
    }

    #[test]
    fn test_load_from_file_errors() {
        let missing = BidifixConfig::load_from_file("/nonexistent/bidifix.toml");
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();
        let invalid = BidifixConfig::load_from_file(file.path());
        assert!(matches!(invalid, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if bidifix.toml doesn't exist.
        let config = BidifixConfig::load_or_default();
        assert_eq!(config.scheduler.nav_poll_interval_ms, 1000);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("BIDIFIX_STYLE_PLAIN_LTR", "true");
            std::env::set_var("BIDIFIX_DEBOUNCE_MS", "250");
        }

        let mut config = BidifixConfig::default();
        config.merge_with_env();

        assert!(config.annotator.style_plain_ltr);
        assert_eq!(config.scheduler.mutation_debounce_ms, 250);

        unsafe {
            std::env::remove_var("BIDIFIX_STYLE_PLAIN_LTR");
            std::env::remove_var("BIDIFIX_DEBOUNCE_MS");
        }
    }

    #[test]
    fn test_merge_with_env_ignores_garbage_numbers() {
        unsafe {
            std::env::set_var("BIDIFIX_RESCAN_MS", "soon");
        }
        let mut config = BidifixConfig::default();
        config.merge_with_env();
        assert_eq!(config.scheduler.rescan_interval_ms, 2000);
        unsafe {
            std::env::remove_var("BIDIFIX_RESCAN_MS");
        }
    }
}
