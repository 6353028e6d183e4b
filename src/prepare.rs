//! From raw records to classified text units: expansion into per-sentiment
//! slices, length filtering, language resolution and deduplication.

use std::collections::HashSet;
use std::fmt;

use crate::config::Config;
use crate::detect::LanguageCascade;
use crate::input::ReviewRecord;
use crate::text::clean_text;

/// Which review field a text unit came from. `Bad` orders before `Good`,
/// matching the alphabetical ordering of the output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Bad,
    Good,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Bad => "bad",
            Sentiment::Good => "good",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-sentiment slice of one record, before language resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub sentiment: Sentiment,
    pub text: String,
    pub hint: Option<String>,
}

/// A text unit whose language resolved to a configured target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedUnit {
    pub language: String,
    pub sentiment: Sentiment,
    pub text: String,
}

/// How many units each filter stage discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropStats {
    pub too_short: usize,
    pub unresolved: usize,
    pub duplicates: usize,
}

/// Expand one record into its two text units, sharing the record's hint.
pub fn expand_record(record: &ReviewRecord) -> [TextUnit; 2] {
    [
        TextUnit {
            sentiment: Sentiment::Good,
            text: record.good.clone(),
            hint: record.lang_hint.clone(),
        },
        TextUnit {
            sentiment: Sentiment::Bad,
            text: record.bad.clone(),
            hint: record.lang_hint.clone(),
        },
    ]
}

/// Turn raw records into classified units.
///
/// Stage order matters: cleanup and the length bar come first so detection
/// cost is only paid on texts that can survive, and deduplication runs last
/// on resolved (language, sentiment, text) triples, first occurrence wins.
/// The cascade only ever returns target languages, so its result doubles as
/// the scope filter.
pub fn prepare_units(
    records: &[ReviewRecord],
    config: &Config,
    cascade: &LanguageCascade<'_>,
) -> (Vec<ClassifiedUnit>, DropStats) {
    let mut stats = DropStats::default();
    let mut seen: HashSet<(String, Sentiment, String)> = HashSet::new();
    let mut units = Vec::new();

    for record in records {
        for unit in expand_record(record) {
            let text = clean_text(&unit.text);
            if text.chars().count() < config.min_text_length {
                stats.too_short += 1;
                continue;
            }
            let Some(language) = cascade.resolve(&text, unit.hint.as_deref()) else {
                stats.unresolved += 1;
                continue;
            };
            if config.drop_duplicates
                && !seen.insert((language.clone(), unit.sentiment, text.clone()))
            {
                stats.duplicates += 1;
                continue;
            }
            units.push(ClassifiedUnit {
                language,
                sentiment: unit.sentiment,
                text,
            });
        }
    }

    (units, stats)
}
