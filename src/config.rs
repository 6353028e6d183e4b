//! JSON configuration: recognized keys, defaults, loading and validation.
//!
//! Column names and thresholds are resolved here once; no stage looks up
//! configuration by string key at runtime.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PipelineError;

/// Optional row filters applied before any text processing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filters {
    /// Allow-list of record ids; empty keeps every record.
    #[serde(default)]
    pub hotel_ids: Vec<String>,
}

/// Policy for texts whose language hint does not resolve.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_min_stopword_hits")]
    pub min_stopword_hits: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_stopword_hits: default_min_stopword_hits(),
        }
    }
}

/// Pipeline configuration, loaded from a JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Review CSV file, or a directory of CSV files.
    pub input_path: PathBuf,
    /// Directory receiving the output tables.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub filters: Filters,
    /// Record identifier column.
    #[serde(default = "default_id_column")]
    pub id_column: String,
    pub good_column: String,
    pub bad_column: String,
    pub language_column: String,
    /// Texts shorter than this (in characters, after cleanup) are dropped
    /// before language detection.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
    /// Languages in scope. The order doubles as the tie-break order for the
    /// stop-word fallback.
    pub target_languages: Vec<String>,
    #[serde(default)]
    pub language_fallback: FallbackConfig,
    #[serde(default = "default_allowed_pos")]
    pub allowed_pos: Vec<String>,
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Keep only the first of identical (language, sentiment, text) units.
    #[serde(default = "default_true")]
    pub drop_duplicates: bool,
    /// NLP model identifier per target language, e.g. "snowball/english".
    pub language_models: HashMap<String, String>,
    /// Where the generated report is written.
    pub report_path: PathBuf,
    /// Display names used in report headings; codes are the fallback.
    #[serde(default)]
    pub language_labels: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}
fn default_id_column() -> String {
    "hotelId".to_string()
}
fn default_min_text_length() -> usize {
    15
}
fn default_min_stopword_hits() -> usize {
    2
}
fn default_allowed_pos() -> Vec<String> {
    vec!["ADJ".to_string(), "NOUN".to_string(), "PROPN".to_string()]
}
fn default_min_token_length() -> usize {
    2
}
fn default_ngram_size() -> usize {
    3
}
fn default_top_n() -> usize {
    20
}

/// Read and validate a configuration document.
pub fn load_config(path: &Path) -> Result<Config, PipelineError> {
    let raw = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config =
        serde_json::from_str(&raw).map_err(|source| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target_languages.is_empty() {
            return Err(PipelineError::ConfigValue(
                "target_languages must not be empty".to_string(),
            ));
        }
        if self.ngram_size == 0 {
            return Err(PipelineError::ConfigValue(
                "ngram_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Display label for a language code, falling back to the code itself.
    pub fn language_label<'a>(&'a self, lang: &'a str) -> &'a str {
        self.language_labels
            .get(lang)
            .map(String::as_str)
            .unwrap_or(lang)
    }
}

/// Minimal valid configuration used by unit tests across the crate.
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        input_path: PathBuf::from("reviews.csv"),
        output_dir: PathBuf::from("out"),
        filters: Filters::default(),
        id_column: default_id_column(),
        good_column: "good".to_string(),
        bad_column: "bad".to_string(),
        language_column: "lang".to_string(),
        min_text_length: default_min_text_length(),
        target_languages: vec!["en".to_string()],
        language_fallback: FallbackConfig::default(),
        allowed_pos: default_allowed_pos(),
        min_token_length: default_min_token_length(),
        ngram_size: default_ngram_size(),
        top_n: default_top_n(),
        drop_duplicates: true,
        language_models: HashMap::from([("en".to_string(), "snowball/english".to_string())]),
        report_path: PathBuf::from("report.md"),
        language_labels: HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> serde_json::Value {
        serde_json::json!({
            "input_path": "data/reviews.csv",
            "output_dir": "output",
            "good_column": "positive_review",
            "bad_column": "negative_review",
            "language_column": "reviewer_language",
            "target_languages": ["en", "de", "fr"],
            "language_models": {
                "en": "snowball/english",
                "de": "snowball/german",
                "fr": "snowball/french"
            },
            "report_path": "output/report.md"
        })
    }

    #[test]
    fn defaults_are_applied() {
        let config: Config = serde_json::from_value(minimal_json()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.min_text_length, 15);
        assert_eq!(config.min_token_length, 2);
        assert_eq!(config.ngram_size, 3);
        assert_eq!(config.top_n, 20);
        assert!(config.drop_duplicates);
        assert!(config.language_fallback.enabled);
        assert_eq!(config.language_fallback.min_stopword_hits, 2);
        assert_eq!(config.allowed_pos, vec!["ADJ", "NOUN", "PROPN"]);
        assert_eq!(config.id_column, "hotelId");
        assert!(config.filters.hotel_ids.is_empty());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let mut json = minimal_json();
        json["min_text_length"] = serde_json::json!(30);
        json["ngram_size"] = serde_json::json!(2);
        json["language_fallback"] = serde_json::json!({"enabled": false});
        json["filters"] = serde_json::json!({"hotel_ids": ["h1"]});
        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.min_text_length, 30);
        assert_eq!(config.ngram_size, 2);
        assert!(!config.language_fallback.enabled);
        // min_stopword_hits keeps its default inside a partial object
        assert_eq!(config.language_fallback.min_stopword_hits, 2);
        assert_eq!(config.filters.hotel_ids, vec!["h1"]);
    }

    #[test]
    fn validation_rejects_degenerate_configs() {
        let mut config = test_config();
        config.target_languages.clear();
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.ngram_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn language_label_falls_back_to_code() {
        let mut config = test_config();
        config
            .language_labels
            .insert("en".to_string(), "English".to_string());
        assert_eq!(config.language_label("en"), "English");
        assert_eq!(config.language_label("de"), "de");
    }
}
