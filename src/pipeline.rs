//! End-to-end orchestration: records to classified units to buckets to
//! tables.
//!
//! Buckets share no mutable state, so tokenize/count/top-K runs under
//! rayon; results are collected back in the fixed (language, sentiment)
//! order before anything is handed to the writer, so parallelism never
//! shows up in the output.

use std::collections::BTreeMap;

use log::info;
use rayon::prelude::*;

use crate::config::Config;
use crate::detect::{LanguageCascade, LanguageDetector, WhatlangDetector};
use crate::error::PipelineError;
use crate::export::{CountRow, NgramRow};
use crate::input::{apply_filters, load_reviews};
use crate::ngram::NgramCounter;
use crate::nlp::{NlpEngine, SnowballEngine, TokenFilter};
use crate::prepare::{prepare_units, ClassifiedUnit, DropStats, Sentiment};
use crate::stopwords::StopwordRegistry;

/// Everything a run produces, accumulated in memory so the caller can
/// write it out in one step.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub counts: Vec<CountRow>,
    pub top_ngrams: Vec<NgramRow>,
    pub drops: DropStats,
}

/// Run the full pipeline with the production capabilities: the whatlang
/// detector and the bundled Snowball engine.
pub fn run_pipeline(config: &Config) -> Result<PipelineOutput, PipelineError> {
    let registry = StopwordRegistry::builtin();
    let engine = SnowballEngine::from_config(config, &registry)?;
    run_pipeline_with(config, &registry, &WhatlangDetector, &engine)
}

/// Run the pipeline with injected capabilities; tests swap in scripted
/// detectors and engines here.
pub fn run_pipeline_with(
    config: &Config,
    registry: &StopwordRegistry,
    detector: &dyn LanguageDetector,
    engine: &dyn NlpEngine,
) -> Result<PipelineOutput, PipelineError> {
    let records = apply_filters(load_reviews(config)?, config);
    info!("loaded {} review records", records.len());

    let cascade = LanguageCascade::new(
        &config.target_languages,
        config.language_fallback,
        registry,
        detector,
    );
    let (units, drops) = prepare_units(&records, config, &cascade);
    info!(
        "{} text units survived filtering ({} too short, {} unresolved, {} duplicates)",
        units.len(),
        drops.too_short,
        drops.unresolved,
        drops.duplicates
    );

    let counts = summarize(&units);
    let token_filter = TokenFilter::from_config(config)?;
    let top_ngrams = bucket_ngrams(units, config, &token_filter, engine)?;

    Ok(PipelineOutput {
        counts,
        top_ngrams,
        drops,
    })
}

/// Review counts per (language, sentiment), in the fixed output order.
pub fn summarize(units: &[ClassifiedUnit]) -> Vec<CountRow> {
    let mut counts: BTreeMap<(String, Sentiment), u64> = BTreeMap::new();
    for unit in units {
        *counts
            .entry((unit.language.clone(), unit.sentiment))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((language, sentiment), reviews)| CountRow {
            language,
            sentiment: sentiment.to_string(),
            reviews,
        })
        .collect()
}

/// Tokenize, count and select top-K per bucket, in parallel.
fn bucket_ngrams(
    units: Vec<ClassifiedUnit>,
    config: &Config,
    token_filter: &TokenFilter,
    engine: &dyn NlpEngine,
) -> Result<Vec<NgramRow>, PipelineError> {
    // BTreeMap fixes the bucket order; unit order within a bucket is record
    // order, which feeds the first-seen tie-break downstream.
    let mut buckets: BTreeMap<(String, Sentiment), Vec<String>> = BTreeMap::new();
    for unit in units {
        buckets
            .entry((unit.language, unit.sentiment))
            .or_default()
            .push(unit.text);
    }

    let buckets: Vec<((String, Sentiment), Vec<String>)> = buckets.into_iter().collect();
    let per_bucket: Result<Vec<Vec<NgramRow>>, PipelineError> = buckets
        .par_iter()
        .map(|((language, sentiment), texts)| {
            let annotated = engine.annotate_batch(language, texts)?;
            let mut counter = NgramCounter::new(config.ngram_size);
            for tokens in &annotated {
                if let Some(lemmas) = token_filter.lemmas(tokens) {
                    counter.add_document(&lemmas);
                }
            }
            Ok(counter
                .top(config.top_n)
                .into_iter()
                .map(|(ngram, freq)| NgramRow {
                    language: language.clone(),
                    sentiment: sentiment.to_string(),
                    ngram,
                    freq,
                })
                .collect())
        })
        .collect();

    Ok(per_bucket?.into_iter().flatten().collect())
}
