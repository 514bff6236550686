// Character classification for word boundaries and phonology

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Characters that end a word. A result only matches at one of these or at
/// the end of the input.
pub const PUNCTUATION: &[char] = &[' ', ',', ';', '.', '…', '—', '–', '-', '?', '!'];

/// Na'vi vowels (lowercase), including the pseudo-loan `é` and `ù`.
const NAVI_VOWELS: &[char] = &['a', 'ä', 'e', 'é', 'i', 'ì', 'o', 'u', 'ù'];

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Check whether a character is a word boundary.
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Check whether a character is a Na'vi vowel.
pub fn is_vowel(c: char) -> bool {
    NAVI_VOWELS.contains(&c)
}

/// True if `text` is empty or begins at a word boundary.
pub fn at_word_boundary(text: &str) -> bool {
    text.is_empty() || text.starts_with(is_punctuation)
}

/// Strip punctuation from both ends.
pub fn trim_punctuation(text: &str) -> &str {
    text.trim_matches(is_punctuation)
}

/// Byte index of the next word boundary, if any.
pub fn next_boundary(text: &str) -> Option<usize> {
    text.find(is_punctuation)
}

/// The last character of `text` as a string slice, or `""` when empty.
pub fn last_char(text: &str) -> &str {
    match text.char_indices().next_back() {
        Some((i, _)) => &text[i..],
        None => "",
    }
}
