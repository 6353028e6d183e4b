#![forbid(unsafe_code)]
//! # Review Insights
//!
//! A multilingual hotel-review analysis pipeline. Reviews arrive as CSV
//! rows with a positive and a negative free-text field; the pipeline
//! resolves the language of each text, groups texts into (language,
//! sentiment) buckets, extracts the most frequent lemma n-grams per bucket,
//! and writes frequency tables plus a summary report.
//!
//! The interesting decision logic lives in two places:
//!
//! - [`detect`] — the language identification cascade: trust the metadata
//!   hint, then ask a probabilistic detector, then fall back to
//!   deterministic stop-word overlap.
//! - [`ngram`] — single-pass n-gram accumulation with first-seen ordering,
//!   which makes top-K tie-breaks reproducible.
//!
//! Everything linguistic (stop-word flags, POS tags, lemmas) is consumed
//! through the [`nlp::NlpEngine`] trait; a deterministic Snowball-based
//! implementation ships with the crate.

pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod input;
pub mod ngram;
pub mod nlp;
pub mod pipeline;
pub mod prepare;
pub mod report;
pub mod stopwords;
pub mod text;

pub use config::{Config, FallbackConfig, Filters, load_config};
pub use detect::{
    LanguageCascade, LanguageDetector, NoopDetector, WhatlangDetector, normalize_language,
};
pub use error::PipelineError;
pub use export::{COUNTS_FILE, CountRow, NGRAMS_FILE, NgramRow, csv_safe_cell, write_outputs};
pub use input::{ReviewRecord, apply_filters, load_reviews};
pub use ngram::NgramCounter;
pub use nlp::{NlpEngine, PosTag, SnowballEngine, TokenAnnotation, TokenFilter};
pub use pipeline::{PipelineOutput, run_pipeline, run_pipeline_with, summarize};
pub use prepare::{ClassifiedUnit, DropStats, Sentiment, TextUnit, expand_record, prepare_units};
pub use report::{generate_report, render_report, write_report};
pub use stopwords::StopwordRegistry;
pub use text::{clean_text, latin_words};
