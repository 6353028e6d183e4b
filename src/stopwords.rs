//! Built-in stop-word sets and the registry handed to the detection
//! cascade and the bundled NLP engine.

use std::collections::{HashMap, HashSet};

/// Embedded stop-word lists, one word per line.
const BUILTIN: &[(&str, &str)] = &[
    ("en", include_str!("stopwords/en.txt")),
    ("de", include_str!("stopwords/de.txt")),
    ("fr", include_str!("stopwords/fr.txt")),
    ("es", include_str!("stopwords/es.txt")),
];

/// Stop-word sets keyed by two-letter language code.
///
/// Constructed once per run and passed by reference wherever stop-word
/// membership is needed; target languages without a registered set simply
/// score zero in the detection fallback.
#[derive(Debug, Clone, Default)]
pub struct StopwordRegistry {
    sets: HashMap<String, HashSet<String>>,
}

impl StopwordRegistry {
    /// Registry with the built-in languages (en, de, fr, es).
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for (lang, words) in BUILTIN {
            registry.insert(lang, words.lines());
        }
        registry
    }

    /// Register or extend the set for `lang`. Words are lower-cased; blank
    /// lines are skipped, so file contents can be fed in directly.
    pub fn insert<'a, I>(&mut self, lang: &str, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set = self.sets.entry(lang.to_string()).or_default();
        for word in words {
            let word = word.trim();
            if !word.is_empty() {
                set.insert(word.to_lowercase());
            }
        }
    }

    /// The set registered for `lang`, if any.
    pub fn get(&self, lang: &str) -> Option<&HashSet<String>> {
        self.sets.get(lang)
    }

    /// True if `word` (already lower-cased) is a stop word of `lang`.
    pub fn is_stop(&self, lang: &str, word: &str) -> bool {
        self.get(lang).is_some_and(|set| set.contains(word))
    }
}
