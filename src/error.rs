use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide error type. Every fatal condition funnels through here so the
/// binary can log one line and exit non-zero.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    ConfigValue(String),

    #[error("input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("column {column:?} not present in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    CsvRead { path: PathBuf, source: csv::Error },

    #[error("failed to write {}: {source}", .path.display())]
    CsvWrite { path: PathBuf, source: csv::Error },

    #[error(
        "no NLP model configured for target language {language:?}; \
         add a \"language_models\" entry such as \"snowball/english\""
    )]
    ModelMissing { language: String },

    #[error(
        "unknown NLP model {model:?} for language {language:?}; \
         supported identifiers: {supported}"
    )]
    ModelUnknown {
        language: String,
        model: String,
        supported: String,
    },

    #[error("output table not found: {} (run the pipeline first)", .0.display())]
    MissingTable(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
