//! Output tables: row shapes, CSV writing, and the good/bad partitions.
//!
//! Tables are accumulated in memory by the pipeline and written here in one
//! pass, so a failed run never leaves a half-written output directory.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One row of `summary_counts.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub language: String,
    pub sentiment: String,
    pub reviews: u64,
}

/// One row of the n-gram tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRow {
    pub language: String,
    pub sentiment: String,
    pub ngram: String,
    pub freq: u64,
}

pub const COUNTS_FILE: &str = "summary_counts.csv";
pub const NGRAMS_FILE: &str = "top_ngrams_summary.csv";

/// Neutralize cells a spreadsheet would interpret as formulas.
pub fn csv_safe_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{cell}"),
        _ => cell,
    }
}

/// Write one table with an explicit header, so empty tables still come out
/// as a valid header-only CSV.
fn write_table<S: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[S],
) -> Result<(), PipelineError> {
    let csv_err = |source| PipelineError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(header).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|source| PipelineError::io(format!("flush {}", path.display()), source))?;
    Ok(())
}

/// Write every output table: the two summary tables plus per-bucket slices
/// partitioned into `good/` and `bad/` directories.
pub fn write_outputs(
    output_dir: &Path,
    counts: &[CountRow],
    ngrams: &[NgramRow],
) -> Result<(), PipelineError> {
    let good_dir = output_dir.join("good");
    let bad_dir = output_dir.join("bad");
    for dir in [output_dir, good_dir.as_path(), bad_dir.as_path()] {
        fs::create_dir_all(dir)
            .map_err(|source| PipelineError::io(format!("create {}", dir.display()), source))?;
    }

    write_table(
        &output_dir.join(COUNTS_FILE),
        &["language", "sentiment", "reviews"],
        counts,
    )?;

    let sanitized: Vec<NgramRow> = ngrams
        .iter()
        .map(|row| NgramRow {
            ngram: csv_safe_cell(row.ngram.clone()),
            ..row.clone()
        })
        .collect();
    write_table(
        &output_dir.join(NGRAMS_FILE),
        &["language", "sentiment", "ngram", "freq"],
        &sanitized,
    )?;

    // The combined table arrives grouped bucket by bucket, so contiguous
    // dedup recovers the bucket list.
    let mut buckets: Vec<(&str, &str)> = sanitized
        .iter()
        .map(|row| (row.language.as_str(), row.sentiment.as_str()))
        .collect();
    buckets.dedup();
    for (language, sentiment) in buckets {
        let rows: Vec<&NgramRow> = sanitized
            .iter()
            .filter(|row| row.language == language && row.sentiment == sentiment)
            .collect();
        let dir = if sentiment == "good" {
            &good_dir
        } else {
            &bad_dir
        };
        let file = dir.join(format!("top_ngrams_{language}_{sentiment}.csv"));
        write_table(&file, &["language", "sentiment", "ngram", "freq"], &rows)?;
    }
    Ok(())
}
