//! Sliding-window n-gram accumulation and top-K selection.

use indexmap::IndexMap;

/// Frequency table for one (language, sentiment) bucket.
///
/// Backed by an insertion-ordered map so first-seen order survives
/// accumulation; that order is the documented tie-break for [`top`].
///
/// [`top`]: NgramCounter::top
#[derive(Debug, Clone)]
pub struct NgramCounter {
    size: usize,
    counts: IndexMap<Vec<String>, u64>,
}

impl NgramCounter {
    /// A counter for windows of `size` lemmas. `size` is validated at
    /// configuration load time and must be at least 1.
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 1, "n-gram window needs at least one slot");
        Self {
            size,
            counts: IndexMap::new(),
        }
    }

    /// Count every window of one document. Sequences shorter than the
    /// window contribute nothing, and windows never span documents.
    pub fn add_document(&mut self, lemmas: &[String]) {
        for window in lemmas.windows(self.size) {
            *self.counts.entry(window.to_vec()).or_insert(0) += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// The `k` most frequent n-grams, joined with single spaces, in
    /// count-descending order. Equal counts keep first-seen order (stable
    /// sort over the insertion-ordered map).
    pub fn top(&self, k: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(&Vec<String>, u64)> = self
            .counts
            .iter()
            .map(|(ngram, count)| (ngram, *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(k);
        entries
            .into_iter()
            .map(|(ngram, count)| (ngram.join(" "), count))
            .collect()
    }
}
