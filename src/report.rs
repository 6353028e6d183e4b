//! The human-readable summary report.
//!
//! [`render_report`] is a pure function over already-aggregated tables;
//! [`generate_report`] reads the tables a previous run wrote back in and
//! renders. Keeping the renderer pure makes the structure testable without
//! touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::Config;
use crate::error::PipelineError;
use crate::export::{CountRow, NgramRow, COUNTS_FILE, NGRAMS_FILE};

/// Most n-grams listed per bucket section.
const SECTION_LIMIT: usize = 10;

/// Render the report from aggregated tables. Languages appear in the
/// configured target order; n-gram rows are expected count-descending, as
/// the pipeline writes them.
pub fn render_report(config: &Config, counts: &[CountRow], ngrams: &[NgramRow]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Hotel review insights by language".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Generated by the review analysis pipeline on {}.",
        Local::now().format("%Y-%m-%d")
    ));
    lines.push(
        "Use this document to read the dominant themes in positive and negative reviews \
         for each target language."
            .to_string(),
    );
    lines.push(String::new());

    for lang in &config.target_languages {
        lines.push(format!("## {} ({})", config.language_label(lang), lang));

        let sum = |sentiment: &str| -> u64 {
            counts
                .iter()
                .filter(|row| &row.language == lang && row.sentiment == sentiment)
                .map(|row| row.reviews)
                .sum()
        };
        lines.push(format!(
            "- Reviews analysed: **{} good** | **{} bad**",
            sum("good"),
            sum("bad")
        ));

        for (sentiment, title) in [("good", "Positive themes"), ("bad", "Negative themes")] {
            lines.push(format!("### {title}"));
            let mut empty = true;
            for row in ngrams
                .iter()
                .filter(|row| &row.language == lang && row.sentiment == sentiment)
                .take(SECTION_LIMIT)
            {
                lines.push(format!("- {} ({})", row.ngram, row.freq));
                empty = false;
            }
            if empty {
                lines.push("- Not enough data for this bucket.".to_string());
            }
        }
        lines.push(String::new());
    }

    lines.push("## Suggested follow-up".to_string());
    lines.push(
        "- Compare positive and negative themes per language to adjust messaging and \
         operational priorities."
            .to_string(),
    );
    lines.push(
        "- Investigate recurring negative items and validate them with local operations."
            .to_string(),
    );
    lines.push("- Feed the positive themes into segmented marketing copy.".to_string());

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn read_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingTable(path.to_path_buf()));
    }
    let csv_err = |source| PipelineError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(csv_err)?);
    }
    Ok(rows)
}

/// Render the report from the tables a previous run wrote to `output_dir`.
pub fn generate_report(config: &Config) -> Result<String, PipelineError> {
    let counts: Vec<CountRow> = read_table(&config.output_dir.join(COUNTS_FILE))?;
    let ngrams: Vec<NgramRow> = read_table(&config.output_dir.join(NGRAMS_FILE))?;
    Ok(render_report(config, &counts, &ngrams))
}

/// Generate the report and write it to the configured `report_path`.
pub fn write_report(config: &Config) -> Result<PathBuf, PipelineError> {
    let report = generate_report(config)?;
    if let Some(parent) = config.report_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| {
                PipelineError::io(format!("create {}", parent.display()), source)
            })?;
        }
    }
    fs::write(&config.report_path, &report).map_err(|source| {
        PipelineError::io(format!("write {}", config.report_path.display()), source)
    })?;
    Ok(config.report_path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    fn count_row(language: &str, sentiment: &str, reviews: u64) -> CountRow {
        CountRow {
            language: language.to_string(),
            sentiment: sentiment.to_string(),
            reviews,
        }
    }

    fn ngram_row(language: &str, sentiment: &str, ngram: &str, freq: u64) -> NgramRow {
        NgramRow {
            language: language.to_string(),
            sentiment: sentiment.to_string(),
            ngram: ngram.to_string(),
            freq,
        }
    }

    fn two_language_config() -> Config {
        let mut config = test_config();
        config.target_languages = vec!["en".to_string(), "fr".to_string()];
        config
            .language_labels
            .insert("en".to_string(), "English".to_string());
        config
    }

    #[test]
    fn sections_follow_target_order_with_labels() {
        let config = two_language_config();
        let report = render_report(&config, &[], &[]);
        let en = report.find("## English (en)").expect("en section");
        let fr = report.find("## fr (fr)").expect("fr section");
        let closing = report.find("## Suggested follow-up").expect("closing");
        assert!(en < fr && fr < closing);
        assert!(report.starts_with("# Hotel review insights by language\n"));
        assert!(report.contains("Generated by the review analysis pipeline on "));
    }

    #[test]
    fn counts_line_sums_good_and_bad() {
        let config = two_language_config();
        let counts = vec![
            count_row("en", "good", 7),
            count_row("en", "bad", 3),
            count_row("fr", "good", 1),
        ];
        let report = render_report(&config, &counts, &[]);
        assert!(report.contains("- Reviews analysed: **7 good** | **3 bad**"));
        assert!(report.contains("- Reviews analysed: **1 good** | **0 bad**"));
    }

    #[test]
    fn bucket_sections_list_at_most_ten_ngrams() {
        let config = two_language_config();
        let ngrams: Vec<NgramRow> = (0..12)
            .map(|i| ngram_row("en", "good", &format!("theme number {i}"), 12 - i as u64))
            .collect();
        let report = render_report(&config, &[], &ngrams);
        assert!(report.contains("- theme number 0 (12)"));
        assert!(report.contains("- theme number 9 (3)"));
        assert!(!report.contains("- theme number 10"));
        assert!(!report.contains("- theme number 11"));
    }

    #[test]
    fn empty_buckets_render_the_placeholder() {
        let config = two_language_config();
        let ngrams = vec![ngram_row("en", "good", "clean room", 2)];
        let report = render_report(&config, &[], &ngrams);
        // en/good has data; en/bad and both fr buckets show the placeholder.
        let placeholders = report.matches("- Not enough data for this bucket.").count();
        assert_eq!(placeholders, 3);
        assert!(report.contains("- clean room (2)"));
    }

    #[test]
    fn positive_section_precedes_negative_within_a_language() {
        let config = two_language_config();
        let report = render_report(&config, &[], &[]);
        let en_start = report.find("## English (en)").unwrap();
        let positive = report[en_start..].find("### Positive themes").unwrap();
        let negative = report[en_start..].find("### Negative themes").unwrap();
        assert!(positive < negative);
    }

    #[test]
    fn generate_report_requires_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.output_dir = dir.path().to_path_buf();

        let err = generate_report(&config).unwrap_err();
        match err {
            PipelineError::MissingTable(path) => {
                assert!(path.ends_with(COUNTS_FILE), "unexpected path {path:?}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
