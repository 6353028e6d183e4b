//! The language identification cascade.
//!
//! Resolution order is strict and short-circuiting: trust the metadata hint
//! when it names a target language, then ask the probabilistic detector,
//! then fall back to stop-word overlap. The fallback is deterministic and
//! dependency-free, so runs stay reproducible even when probabilistic
//! detection is unavailable.

use std::collections::HashSet;

use crate::config::FallbackConfig;
use crate::stopwords::StopwordRegistry;
use crate::text::latin_words;

/// Strip a region suffix and lower-case a language hint ("EN-US" becomes
/// "en"). Empty or missing hints normalize to `None`.
pub fn normalize_language(hint: Option<&str>) -> Option<String> {
    let value = hint?.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }
    match value.split_once('-') {
        Some((primary, _region)) => Some(primary.to_string()),
        None => Some(value),
    }
}

/// Best-effort probabilistic language detection.
///
/// Implementations never fail loudly: anything inconclusive is `None` and
/// the cascade moves on.
pub trait LanguageDetector: Send + Sync {
    /// Two-letter code of the detected language, if any.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Production detector backed by `whatlang`. Guesses the library marks as
/// unreliable count as no opinion.
#[derive(Debug, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        if !info.is_reliable() {
            return None;
        }
        iso_639_1(info.lang().code()).map(str::to_string)
    }
}

/// Stand-in used when probabilistic detection should stay out of the
/// picture; the cascade then rests on hints and stop words alone.
#[derive(Debug, Default)]
pub struct NoopDetector;

impl LanguageDetector for NoopDetector {
    fn detect(&self, _text: &str) -> Option<String> {
        None
    }
}

/// Map whatlang's ISO 639-3 codes to the two-letter codes used everywhere
/// else in the pipeline. Codes outside this table stay unresolved.
fn iso_639_1(code: &str) -> Option<&'static str> {
    Some(match code {
        "eng" => "en",
        "deu" => "de",
        "fra" => "fr",
        "spa" => "es",
        "ita" => "it",
        "por" => "pt",
        "nld" => "nl",
        "rus" => "ru",
        "ukr" => "uk",
        "pol" => "pl",
        "ces" => "cs",
        "slk" => "sk",
        "swe" => "sv",
        "dan" => "da",
        "fin" => "fi",
        "nob" => "no",
        "hun" => "hu",
        "ron" => "ro",
        "bul" => "bg",
        "ell" => "el",
        "tur" => "tr",
        "ara" => "ar",
        "heb" => "he",
        "hin" => "hi",
        "jpn" => "ja",
        "kor" => "ko",
        "cmn" => "zh",
        "vie" => "vi",
        "ind" => "id",
        "tha" => "th",
        "cat" => "ca",
        "lit" => "lt",
        "lav" => "lv",
        "est" => "et",
        "srp" => "sr",
        "hrv" => "hr",
        _ => return None,
    })
}

/// The full cascade, wired up once per run with the configured targets, the
/// stop-word registry and an injected detector.
pub struct LanguageCascade<'a> {
    targets: &'a [String],
    fallback: FallbackConfig,
    registry: &'a StopwordRegistry,
    detector: &'a dyn LanguageDetector,
}

impl<'a> LanguageCascade<'a> {
    pub fn new(
        targets: &'a [String],
        fallback: FallbackConfig,
        registry: &'a StopwordRegistry,
        detector: &'a dyn LanguageDetector,
    ) -> Self {
        Self {
            targets,
            fallback,
            registry,
            detector,
        }
    }

    /// Resolve the language of `text`. Returns a member of the target list
    /// or `None`; a hint naming a target wins outright and no detection is
    /// attempted, even if the text content disagrees.
    pub fn resolve(&self, text: &str, hint: Option<&str>) -> Option<String> {
        if let Some(lang) = normalize_language(hint) {
            if self.targets.contains(&lang) {
                return Some(lang);
            }
        }

        if !self.fallback.enabled {
            return None;
        }

        if let Some(detected) = self.detector.detect(text) {
            if self.targets.contains(&detected) {
                return Some(detected);
            }
        }

        self.stopword_guess(text)
    }

    /// Score every target language by distinct stop-word overlap and pick
    /// the maximum. Iterating targets in configured order with a
    /// strictly-greater comparison makes "first target wins ties" a
    /// structural property rather than an accident of map ordering.
    fn stopword_guess(&self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        let words: HashSet<&str> = latin_words(&lowered).collect();
        if words.is_empty() {
            return None;
        }

        let mut best: Option<(&String, usize)> = None;
        for lang in self.targets {
            let hits = match self.registry.get(lang) {
                Some(set) => words.iter().copied().filter(|w| set.contains(*w)).count(),
                None => 0,
            };
            if best.is_none_or(|(_, top)| hits > top) {
                best = Some((lang, hits));
            }
        }

        let (lang, hits) = best?;
        if hits < self.fallback.min_stopword_hits {
            return None;
        }
        Some(lang.clone())
    }
}
