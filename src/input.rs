//! Review records and CSV loading.
//!
//! Configured column names are resolved against the header exactly once;
//! the rest of the pipeline works with typed records only.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::PipelineError;

/// One source row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub id: String,
    pub lang_hint: Option<String>,
    pub good: String,
    pub bad: String,
}

/// Column indices resolved against a CSV header.
struct Columns {
    id: usize,
    lang: usize,
    good: usize,
    bad: usize,
}

impl Columns {
    fn resolve(
        headers: &csv::StringRecord,
        config: &Config,
        path: &Path,
    ) -> Result<Self, PipelineError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| PipelineError::MissingColumn {
                    column: name.to_string(),
                    path: path.to_path_buf(),
                })
        };
        Ok(Self {
            id: find(&config.id_column)?,
            lang: find(&config.language_column)?,
            good: find(&config.good_column)?,
            bad: find(&config.bad_column)?,
        })
    }
}

/// Load all review records from `input_path`, which may be a single CSV
/// file or a directory of CSV files (read in sorted path order).
pub fn load_reviews(config: &Config) -> Result<Vec<ReviewRecord>, PipelineError> {
    let path = &config.input_path;
    if !path.exists() {
        return Err(PipelineError::MissingInput(path.clone()));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else {
        files.push(path.clone());
    }

    let mut records = Vec::new();
    for file in &files {
        read_csv(file, config, &mut records)?;
    }
    Ok(records)
}

fn read_csv(
    path: &Path,
    config: &Config,
    out: &mut Vec<ReviewRecord>,
) -> Result<(), PipelineError> {
    let csv_err = |source| PipelineError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = Columns::resolve(&headers, config, path)?;

    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        let hint = row
            .get(columns.lang)
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
            .map(str::to_string);
        out.push(ReviewRecord {
            id: row.get(columns.id).unwrap_or("").to_string(),
            lang_hint: hint,
            good: row.get(columns.good).unwrap_or("").to_string(),
            bad: row.get(columns.bad).unwrap_or("").to_string(),
        });
    }
    Ok(())
}

/// Apply the hotel-id allow-list. An empty list keeps every record.
pub fn apply_filters(records: Vec<ReviewRecord>, config: &Config) -> Vec<ReviewRecord> {
    if config.filters.hotel_ids.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| config.filters.hotel_ids.iter().any(|id| id == &record.id))
        .collect()
}
