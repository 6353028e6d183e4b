//! The NLP analysis boundary.
//!
//! The pipeline consumes per-token annotations (stop-word flag, alphabetic
//! flag, POS tag, lemma) through the [`NlpEngine`] trait and applies the
//! token filter on top. The bundled [`SnowballEngine`] keeps the pipeline
//! runnable without external model files: Snowball stems as lemmas, the
//! stop-word registry for stop flags, and a coarse suffix heuristic for POS
//! tags. The trait is the contract, not the tagger.

use std::collections::{HashMap, HashSet};

use rust_stemmers::{Algorithm, Stemmer};

use crate::config::Config;
use crate::error::PipelineError;
use crate::stopwords::StopwordRegistry;

/// Part-of-speech category, Universal Dependencies style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Adj,
    Adv,
    Noun,
    Propn,
    Verb,
    Other,
}

impl PosTag {
    pub fn label(self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Noun => "NOUN",
            PosTag::Propn => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Other => "X",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Some(match label {
            "ADJ" => PosTag::Adj,
            "ADV" => PosTag::Adv,
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::Propn,
            "VERB" => PosTag::Verb,
            "X" => PosTag::Other,
            _ => return None,
        })
    }
}

/// Per-token attributes produced by an NLP engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAnnotation {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub is_alpha: bool,
}

/// The external analysis capability: a language code plus a batch of texts
/// in, one annotated token stream per text out. Implementations must be
/// usable from parallel bucket workers.
pub trait NlpEngine: Send + Sync {
    fn annotate_batch(
        &self,
        language: &str,
        texts: &[String],
    ) -> Result<Vec<Vec<TokenAnnotation>>, PipelineError>;
}

/// The token filter applied on top of any engine: stop words out,
/// non-alphabetic tokens out, disallowed POS out, then the lower-cased
/// trimmed lemma with a minimum length.
#[derive(Debug, Clone)]
pub struct TokenFilter {
    allowed_pos: HashSet<PosTag>,
    min_token_length: usize,
}

impl TokenFilter {
    pub fn new(allowed_pos: HashSet<PosTag>, min_token_length: usize) -> Self {
        Self {
            allowed_pos,
            min_token_length,
        }
    }

    /// Parse `allowed_pos` labels from the configuration; unknown labels
    /// are a configuration error.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let mut allowed_pos = HashSet::new();
        for label in &config.allowed_pos {
            let tag = PosTag::parse(label).ok_or_else(|| {
                PipelineError::ConfigValue(format!("unknown POS tag {label:?} in allowed_pos"))
            })?;
            allowed_pos.insert(tag);
        }
        Ok(Self::new(allowed_pos, config.min_token_length))
    }

    /// Reduce one annotated token stream to its content lemmas. `None` when
    /// nothing survives, so empty documents drop out of the n-gram counts
    /// entirely.
    pub fn lemmas(&self, tokens: &[TokenAnnotation]) -> Option<Vec<String>> {
        let mut out = Vec::new();
        for token in tokens {
            if token.is_stop || !token.is_alpha {
                continue;
            }
            if !self.allowed_pos.contains(&token.pos) {
                continue;
            }
            let lemma = token.lemma.trim().to_lowercase();
            if lemma.chars().count() < self.min_token_length {
                continue;
            }
            out.push(lemma);
        }
        if out.is_empty() { None } else { Some(out) }
    }
}

/// Model identifiers accepted by the bundled engine.
const SNOWBALL_MODELS: &[(&str, Algorithm)] = &[
    ("snowball/arabic", Algorithm::Arabic),
    ("snowball/danish", Algorithm::Danish),
    ("snowball/dutch", Algorithm::Dutch),
    ("snowball/english", Algorithm::English),
    ("snowball/finnish", Algorithm::Finnish),
    ("snowball/french", Algorithm::French),
    ("snowball/german", Algorithm::German),
    ("snowball/greek", Algorithm::Greek),
    ("snowball/hungarian", Algorithm::Hungarian),
    ("snowball/italian", Algorithm::Italian),
    ("snowball/norwegian", Algorithm::Norwegian),
    ("snowball/portuguese", Algorithm::Portuguese),
    ("snowball/romanian", Algorithm::Romanian),
    ("snowball/russian", Algorithm::Russian),
    ("snowball/spanish", Algorithm::Spanish),
    ("snowball/swedish", Algorithm::Swedish),
    ("snowball/tamil", Algorithm::Tamil),
    ("snowball/turkish", Algorithm::Turkish),
];

/// Suffix tables for the POS heuristic: (adjective, adverb, verb) endings.
fn suffix_tables(
    lang: &str,
) -> (
    &'static [&'static str],
    &'static [&'static str],
    &'static [&'static str],
) {
    match lang {
        "en" => (
            &["ous", "ful", "ive", "able", "ible", "ish", "less"],
            &["ly"],
            &["ing", "ed"],
        ),
        "de" => (&["lich", "isch", "ig", "bar", "sam", "haft"], &[], &[]),
        "fr" => (&["eux", "euse", "ible", "able"], &[], &[]),
        "es" => (&["oso", "osa", "ible", "able"], &[], &[]),
        _ => (&[], &[], &[]),
    }
}

struct LanguageModel {
    stemmer: Stemmer,
    stopwords: HashSet<String>,
    adj_suffixes: &'static [&'static str],
    adv_suffixes: &'static [&'static str],
    verb_suffixes: &'static [&'static str],
}

/// Bundled, deterministic implementation of the analysis capability.
pub struct SnowballEngine {
    models: HashMap<String, LanguageModel>,
}

impl std::fmt::Debug for SnowballEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballEngine")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SnowballEngine {
    /// Build one model per configured target language. A missing or unknown
    /// model identifier aborts the run with the fix in the message.
    pub fn from_config(
        config: &Config,
        registry: &StopwordRegistry,
    ) -> Result<Self, PipelineError> {
        let mut models = HashMap::new();
        for lang in &config.target_languages {
            let id = config.language_models.get(lang).ok_or_else(|| {
                PipelineError::ModelMissing {
                    language: lang.clone(),
                }
            })?;
            let algorithm = SNOWBALL_MODELS
                .iter()
                .find(|(name, _)| *name == id.as_str())
                .map(|(_, algorithm)| *algorithm)
                .ok_or_else(|| PipelineError::ModelUnknown {
                    language: lang.clone(),
                    model: id.clone(),
                    supported: SNOWBALL_MODELS
                        .iter()
                        .map(|(name, _)| *name)
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;
            let (adj_suffixes, adv_suffixes, verb_suffixes) = suffix_tables(lang);
            models.insert(
                lang.clone(),
                LanguageModel {
                    stemmer: Stemmer::create(algorithm),
                    stopwords: registry.get(lang).cloned().unwrap_or_default(),
                    adj_suffixes,
                    adv_suffixes,
                    verb_suffixes,
                },
            );
        }
        Ok(Self { models })
    }

    fn tag(model: &LanguageModel, token: &str, lowered: &str) -> PosTag {
        if token.chars().next().is_some_and(char::is_uppercase) {
            return PosTag::Propn;
        }
        if model.adv_suffixes.iter().any(|s| lowered.ends_with(s)) {
            return PosTag::Adv;
        }
        if model.adj_suffixes.iter().any(|s| lowered.ends_with(s)) {
            return PosTag::Adj;
        }
        if model.verb_suffixes.iter().any(|s| lowered.ends_with(s)) {
            return PosTag::Verb;
        }
        PosTag::Noun
    }
}

impl NlpEngine for SnowballEngine {
    fn annotate_batch(
        &self,
        language: &str,
        texts: &[String],
    ) -> Result<Vec<Vec<TokenAnnotation>>, PipelineError> {
        let model = self
            .models
            .get(language)
            .ok_or_else(|| PipelineError::ModelMissing {
                language: language.to_string(),
            })?;

        let mut batch = Vec::with_capacity(texts.len());
        for text in texts {
            let mut tokens = Vec::new();
            for raw in text.split_whitespace() {
                let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
                if word.is_empty() {
                    continue;
                }
                let lowered = word.to_lowercase();
                tokens.push(TokenAnnotation {
                    is_alpha: word.chars().all(char::is_alphabetic),
                    is_stop: model.stopwords.contains(&lowered),
                    pos: Self::tag(model, word, &lowered),
                    lemma: model.stemmer.stem(&lowered).into_owned(),
                    text: word.to_string(),
                });
            }
            batch.push(tokens);
        }
        Ok(batch)
    }
}
