//! Label text normalization
//!
//! Applied identically to labels, placeholders and dictionary keywords.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for comparison
///
/// NFC + lower-case, every char that is not a word char, whitespace or a Hangul
/// syllable becomes a space, whitespace runs collapse to one space, then trim.
/// Pure and total: empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.nfc().collect::<String>().to_lowercase();

    let mut result = String::with_capacity(lowered.len());
    let mut prev_whitespace = false;

    for ch in lowered.chars() {
        if is_kept(ch) {
            result.push(ch);
            prev_whitespace = false;
        } else if !prev_whitespace {
            // symbols and whitespace alike collapse into a single space
            result.push(' ');
            prev_whitespace = true;
        }
    }

    result.trim().to_string()
}

/// Length in chars, the unit every length rule is expressed in
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn is_kept(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || is_hangul_syllable(ch)
}

/// Hangul Syllables block (가-힣)
fn is_hangul_syllable(ch: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&ch)
}
