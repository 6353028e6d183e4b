//! Integration tests for `review_insights`.
//
// This suite verifies:
// - Library behavior end-to-end (filtering, detection cascade, bucket
//   aggregation, table writing, report rendering) on temp directories
// - CLI behavior for both subcommands, including the fatal paths
//
// Notes:
// - Everything works against explicit paths from the config; no test
//   changes the process working directory.

use std::fs;
use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use predicates::prelude::*;

use review_insights::{
    COUNTS_FILE, Config, NGRAMS_FILE, generate_report, run_pipeline, write_outputs, write_report,
};

// --------------------- helpers ---------------------

/// Create a file with content in a temp dir.
fn write_file(dir: &assert_fs::TempDir, name: &str, content: &str) -> PathBuf {
    let f = dir.child(name);
    f.write_str(content).unwrap();
    f.path().to_path_buf()
}

/// Baseline config document pointing into a temp dir, single target "en".
fn config_json(input: &Path, output: &Path, report: &Path) -> serde_json::Value {
    serde_json::json!({
        "input_path": input,
        "output_dir": output,
        "good_column": "good",
        "bad_column": "bad",
        "language_column": "lang",
        "target_languages": ["en"],
        "language_models": { "en": "snowball/english" },
        "report_path": report,
        "language_labels": { "en": "English" }
    })
}

fn write_config(dir: &assert_fs::TempDir, value: &serde_json::Value) -> PathBuf {
    write_file(dir, "config.json", &serde_json::to_string_pretty(value).unwrap())
}

fn parse_config(value: serde_json::Value) -> Config {
    serde_json::from_value(value).expect("valid config")
}

/// CLI command with logging pinned so fatal messages reach stderr.
fn cli() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("review_insights").unwrap();
    cmd.env("RUST_LOG", "error");
    cmd
}

// --------------------- library end-to-end ---------------------

#[test]
fn lib_end_to_end_hotel_filter_and_length_bar() {
    // One record removed by the allow-list, the survivor's "bad" text
    // below the length bar, leaving a single good-bucket unit.
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(
        &td,
        "reviews.csv",
        "hotelId,lang,good,bad\n\
         h1,en-US,The hotel room and the breakfast buffet with the pool view,ok\n\
         h2,en,Great stay overall with very friendly staff members,awful\n",
    );
    let output = td.path().join("out");
    let report = td.path().join("report.md");

    let mut json = config_json(&input, &output, &report);
    json["filters"] = serde_json::json!({ "hotel_ids": ["h1"] });
    let config = parse_config(json);

    let result = run_pipeline(&config).unwrap();
    assert_eq!(result.counts.len(), 1);
    assert_eq!(result.counts[0].language, "en");
    assert_eq!(result.counts[0].sentiment, "good");
    assert_eq!(result.counts[0].reviews, 1);
    assert_eq!(result.drops.too_short, 1); // "ok"

    // Content words: hotel room breakfast buffet pool view -> 4 trigrams.
    let ngrams: Vec<(&str, u64)> = result
        .top_ngrams
        .iter()
        .map(|row| (row.ngram.as_str(), row.freq))
        .collect();
    assert_eq!(
        ngrams,
        vec![
            ("hotel room breakfast", 1),
            ("room breakfast buffet", 1),
            ("breakfast buffet pool", 1),
            ("buffet pool view", 1),
        ]
    );

    write_outputs(&config.output_dir, &result.counts, &result.top_ngrams).unwrap();
    let counts_csv = fs::read_to_string(output.join(COUNTS_FILE)).unwrap();
    assert_eq!(counts_csv, "language,sentiment,reviews\nen,good,1\n");
    assert!(output.join("good/top_ngrams_en_good.csv").is_file());
    assert!(output.join("bad").is_dir());
    assert!(!output.join("bad/top_ngrams_en_bad.csv").exists());
}

#[test]
fn lib_unhinted_text_resolves_through_the_cascade() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(
        &td,
        "reviews.csv",
        "hotelId,lang,good,bad\n\
         h1,,The breakfast was excellent and the staff at the reception were friendly,\n",
    );
    let output = td.path().join("out");
    let report = td.path().join("report.md");
    let config = parse_config(config_json(&input, &output, &report));

    let result = run_pipeline(&config).unwrap();
    assert_eq!(result.counts.len(), 1);
    assert_eq!(result.counts[0].language, "en");
    assert_eq!(result.counts[0].sentiment, "good");
    assert_eq!(result.counts[0].reviews, 1);
    assert_eq!(result.drops.unresolved, 0);
}

#[test]
fn lib_two_languages_keep_fixed_output_order() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(
        &td,
        "reviews.csv",
        "hotelId,lang,good,bad\n\
         h1,de,Das Zimmer war sehr sauber und das Personal freundlich,\n\
         h2,en,The hotel room was clean and the staff were helpful,Street noise at night was bad\n",
    );
    let output = td.path().join("out");
    let report = td.path().join("report.md");

    let mut json = config_json(&input, &output, &report);
    json["target_languages"] = serde_json::json!(["en", "de"]);
    json["language_models"] = serde_json::json!({
        "en": "snowball/english",
        "de": "snowball/german"
    });
    let config = parse_config(json);

    let result = run_pipeline(&config).unwrap();
    let rows: Vec<(&str, &str, u64)> = result
        .counts
        .iter()
        .map(|row| (row.language.as_str(), row.sentiment.as_str(), row.reviews))
        .collect();
    // Tables are sorted by language then sentiment, not by target order.
    assert_eq!(
        rows,
        vec![("de", "good", 1), ("en", "bad", 1), ("en", "good", 1)]
    );
}

#[test]
fn lib_run_then_report_round_trip() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(
        &td,
        "reviews.csv",
        "hotelId,lang,good,bad\n\
         h1,en,The hotel room and the breakfast buffet with the pool view,\n",
    );
    let output = td.path().join("out");
    let report_path = td.path().join("reports/summary.md");
    let config = parse_config(config_json(&input, &output, &report_path));

    let result = run_pipeline(&config).unwrap();
    write_outputs(&config.output_dir, &result.counts, &result.top_ngrams).unwrap();

    let written = write_report(&config).unwrap();
    assert_eq!(written, report_path);
    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("## English (en)"));
    assert!(report.contains("- Reviews analysed: **1 good** | **0 bad**"));
    assert!(report.contains("- hotel room breakfast (1)"));
    assert!(report.contains("- Not enough data for this bucket."));
    assert!(report.contains("## Suggested follow-up"));
}

#[test]
fn lib_report_requires_written_tables() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(&td, "reviews.csv", "hotelId,lang,good,bad\n");
    let output = td.path().join("never_written");
    let report = td.path().join("report.md");
    let config = parse_config(config_json(&input, &output, &report));

    let err = generate_report(&config).unwrap_err();
    assert!(err.to_string().contains(COUNTS_FILE));
}

// --------------------- CLI: run ---------------------

#[test]
fn cli_run_writes_tables() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(
        &td,
        "reviews.csv",
        "hotelId,lang,good,bad\n\
         h1,en,The hotel room and the breakfast buffet with the pool view,\n",
    );
    let output = td.path().join("out");
    let report = td.path().join("report.md");
    let config = write_config(&td, &config_json(&input, &output, &report));

    cli()
        .args(["run", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("tables written to"));

    assert!(output.join(COUNTS_FILE).is_file());
    assert!(output.join(NGRAMS_FILE).is_file());
    assert!(output.join("good/top_ngrams_en_good.csv").is_file());
}

#[test]
fn cli_run_missing_input_fails_with_the_path() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = td.path().join("nope.csv");
    let output = td.path().join("out");
    let report = td.path().join("report.md");
    let config = write_config(&td, &config_json(&input, &output, &report));

    cli()
        .args(["run", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input not found").and(predicate::str::contains("nope.csv")));
}

#[test]
fn cli_run_missing_language_model_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(&td, "reviews.csv", "hotelId,lang,good,bad\n");
    let output = td.path().join("out");
    let report = td.path().join("report.md");

    let mut json = config_json(&input, &output, &report);
    json["target_languages"] = serde_json::json!(["en", "fr"]);
    let config = write_config(&td, &json);

    cli()
        .args(["run", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("no NLP model configured")
                .and(predicate::str::contains("\"fr\"")),
        );
}

#[test]
fn cli_run_unknown_language_model_fails_listing_supported() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(&td, "reviews.csv", "hotelId,lang,good,bad\n");
    let output = td.path().join("out");
    let report = td.path().join("report.md");

    let mut json = config_json(&input, &output, &report);
    json["language_models"] = serde_json::json!({ "en": "spacy/en_core_web_sm" });
    let config = write_config(&td, &json);

    cli()
        .args(["run", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("spacy/en_core_web_sm")
                .and(predicate::str::contains("snowball/english")),
        );
}

#[test]
fn cli_run_invalid_config_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    let config = write_file(&td, "config.json", "{ not json");

    cli()
        .args(["run", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// --------------------- CLI: report ---------------------

#[test]
fn cli_report_renders_after_run() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(
        &td,
        "reviews.csv",
        "hotelId,lang,good,bad\n\
         h1,en,The hotel room and the breakfast buffet with the pool view,The street outside was loud at night\n",
    );
    let output = td.path().join("out");
    let report_path = td.path().join("report.md");
    let config = write_config(&td, &config_json(&input, &output, &report_path));

    cli()
        .args(["run", "--config", config.to_str().unwrap()])
        .assert()
        .success();
    cli()
        .args(["report", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.starts_with("# Hotel review insights by language"));
    assert!(report.contains("## English (en)"));
    assert!(report.contains("### Positive themes"));
    assert!(report.contains("### Negative themes"));
    assert!(report.contains("- Reviews analysed: **1 good** | **1 bad**"));
}

#[test]
fn cli_report_before_run_fails_naming_the_table() {
    let td = assert_fs::TempDir::new().unwrap();
    let input = write_file(&td, "reviews.csv", "hotelId,lang,good,bad\n");
    let output = td.path().join("out");
    let report = td.path().join("report.md");
    let config = write_config(&td, &config_json(&input, &output, &report));

    cli()
        .args(["report", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(COUNTS_FILE));
}
