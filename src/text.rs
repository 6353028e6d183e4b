//! Raw text cleanup and the Latin word tokenizer used by the stop-word
//! fallback.

/// Collapse all whitespace (including newlines and carriage returns) into
/// single spaces and trim the ends.
///
/// # Example
/// ```
/// use review_insights::text::clean_text;
/// assert_eq!(clean_text("  Great\nlocation,\r\n  friendly   staff. "), "Great location, friendly staff.");
/// ```
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True for the characters the stop-word fallback treats as part of a word:
/// ASCII letters, the common accented Latin-1 ranges, and the apostrophe.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00F6}' | '\u{00F8}'..='\u{00FF}')
        || c == '\''
}

/// Split `text` into maximal runs of Latin word characters.
pub fn latin_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|word| !word.is_empty())
}
