//! Numeral tables and conversions
//!
//! Digits, Korean (Sino-Korean and native) and English spellings of 0-20.
//! Korean spellings only exist for 0-10; larger values fall back to digits.

use aho_corasick::{AhoCorasick, MatchKind};

/// Korean numeral words, Sino-Korean register first
const KOREAN_NUMERALS: &[(&str, i64)] = &[
    ("영", 0),
    ("공", 0),
    ("일", 1),
    ("이", 2),
    ("삼", 3),
    ("사", 4),
    ("오", 5),
    ("육", 6),
    ("칠", 7),
    ("팔", 8),
    ("구", 9),
    ("십", 10),
    // native register
    ("하나", 1),
    ("둘", 2),
    ("셋", 3),
    ("넷", 4),
    ("다섯", 5),
    ("여섯", 6),
    ("일곱", 7),
    ("여덟", 8),
    ("아홉", 9),
    ("열", 10),
];

/// Both Korean spellings of 0-10: (Sino-Korean, native)
///
/// Zero has no native word; both entries are Sino-Korean.
const KOREAN_VARIANTS: [(&str, &str); 11] = [
    ("영", "공"),
    ("일", "하나"),
    ("이", "둘"),
    ("삼", "셋"),
    ("사", "넷"),
    ("오", "다섯"),
    ("육", "여섯"),
    ("칠", "일곱"),
    ("팔", "여덟"),
    ("구", "아홉"),
    ("십", "열"),
];

const ENGLISH_NUMERALS: [&str; 21] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
    "twenty",
];

lazy_static::lazy_static! {
    /// Leftmost-longest scanner over the Korean words ("일곱" wins over "일")
    static ref KOREAN_SCANNER: Option<AhoCorasick> = {
        let words: Vec<&str> = KOREAN_NUMERALS.iter().map(|(w, _)| *w).collect();
        match AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(words)
        {
            Ok(scanner) => Some(scanner),
            Err(e) => {
                tracing::error!("failed to build Korean numeral scanner: {}", e);
                None
            }
        }
    };
}

/// Korean numeral word → value
pub fn korean_numeral_value(word: &str) -> Option<i64> {
    KOREAN_NUMERALS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, v)| *v)
}

/// English numeral word (lower-case) → value
pub fn english_numeral_value(word: &str) -> Option<i64> {
    ENGLISH_NUMERALS
        .iter()
        .position(|w| *w == word)
        .map(|i| i as i64)
}

/// Parse a numeral written as digits, a Korean word or an English word
///
/// Input is trimmed and lower-cased first. Digit strings must denote a whole number.
pub fn text_to_number(text: &str) -> Option<i64> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(value) = parse_literal(&normalized) {
        return Some(value);
    }

    korean_numeral_value(&normalized).or_else(|| english_numeral_value(&normalized))
}

/// All spellings of `n`: digits, then Korean (0-10), then English (0-20)
pub fn number_to_variants(n: i64) -> Vec<String> {
    let mut variants = vec![n.to_string()];

    if let Some((sino, native)) = usize::try_from(n)
        .ok()
        .and_then(|i| KOREAN_VARIANTS.get(i))
    {
        variants.push(sino.to_string());
        variants.push(native.to_string());
    }

    if let Some(english) = usize::try_from(n)
        .ok()
        .and_then(|i| ENGLISH_NUMERALS.get(i))
    {
        variants.push(english.to_string());
    }

    variants
}

/// Spellings of a computed answer
///
/// Whole values get every `number_to_variants` form; fractional values only
/// their digit form.
pub fn result_variants(value: f64) -> Vec<String> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        number_to_variants(value as i64)
    } else {
        vec![format_result(value)]
    }
}

/// Digit form of a computed answer ("5", "2.5"); negative zero prints as "0"
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Read the value a multiple-choice option stands for
///
/// Priority: an embedded digit sequence (optionally with a decimal part), then a
/// Korean numeral word anywhere in the text, then an English numeral as a whole word.
pub fn extract_number_from_option(text: &str) -> Option<f64> {
    let trimmed = text.trim();

    if let Some(value) = first_decimal(trimmed) {
        return Some(value);
    }

    if let Some(value) = first_korean_numeral(trimmed) {
        return Some(value as f64);
    }

    first_english_numeral(&trimmed.to_lowercase()).map(|v| v as f64)
}

/// Whole-number literal, digits or a decimal with no fractional part
fn parse_literal(text: &str) -> Option<i64> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    // only plain decimal notation; rejects "inf", "nan" and exponents
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
    {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// First `\d+(\.\d+)?` in the text
fn first_decimal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    // fractional part only counts when a digit follows the dot
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    text[start..end].parse::<f64>().ok()
}

fn first_korean_numeral(text: &str) -> Option<i64> {
    let scanner = KOREAN_SCANNER.as_ref()?;
    let found = scanner.find(text)?;
    KOREAN_NUMERALS
        .get(found.pattern().as_usize())
        .map(|(_, v)| *v)
}

/// Leftmost English numeral bounded by non-word chars ("one" does not match "someone")
fn first_english_numeral(lower: &str) -> Option<i64> {
    lower
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .find_map(english_numeral_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_number_digits() {
        assert_eq!(text_to_number("5"), Some(5));
        assert_eq!(text_to_number("10"), Some(10));
        assert_eq!(text_to_number("0"), Some(0));
        assert_eq!(text_to_number(" 42 "), Some(42));
        assert_eq!(text_to_number("5.0"), Some(5));
        assert_eq!(text_to_number("2.5"), None);
    }

    #[test]
    fn test_text_to_number_korean() {
        assert_eq!(text_to_number("오"), Some(5));
        assert_eq!(text_to_number("십"), Some(10));
        assert_eq!(text_to_number("일"), Some(1));
        assert_eq!(text_to_number("다섯"), Some(5));
        assert_eq!(text_to_number("열"), Some(10));
        assert_eq!(text_to_number("하나"), Some(1));
        assert_eq!(text_to_number("아홉"), Some(9));
        assert_eq!(text_to_number("영"), Some(0));
        assert_eq!(text_to_number("공"), Some(0));
        assert_eq!(text_to_number(" 다섯 "), Some(5));
    }

    #[test]
    fn test_text_to_number_english() {
        assert_eq!(text_to_number("five"), Some(5));
        assert_eq!(text_to_number("FIVE"), Some(5));
        assert_eq!(text_to_number("zero"), Some(0));
        assert_eq!(text_to_number("twenty"), Some(20));
    }

    #[test]
    fn test_text_to_number_rejects() {
        assert_eq!(text_to_number(""), None);
        assert_eq!(text_to_number("   "), None);
        assert_eq!(text_to_number("not a number"), None);
        assert_eq!(text_to_number("inf"), None);
        assert_eq!(text_to_number("twenty one"), None);
    }

    #[test]
    fn test_variants_contents() {
        assert_eq!(number_to_variants(5), vec!["5", "오", "다섯", "five"]);
        assert_eq!(number_to_variants(10), vec!["10", "십", "열", "ten"]);
        assert_eq!(number_to_variants(0), vec!["0", "영", "공", "zero"]);
        assert_eq!(number_to_variants(1), vec!["1", "일", "하나", "one"]);
    }

    #[test]
    fn test_variants_range_limits() {
        assert_eq!(number_to_variants(15), vec!["15", "fifteen"]);
        assert_eq!(number_to_variants(20), vec!["20", "twenty"]);
        assert_eq!(number_to_variants(21), vec!["21"]);
        assert_eq!(number_to_variants(-3), vec!["-3"]);
    }

    #[test]
    fn test_variants_always_contain_digits() {
        for n in [-100, -1, 0, 7, 11, 20, 99, 12345] {
            assert!(number_to_variants(n).contains(&n.to_string()));
        }
    }

    #[test]
    fn test_variants_roundtrip() {
        for n in 0..=10 {
            for variant in number_to_variants(n) {
                assert_eq!(text_to_number(&variant), Some(n), "{}", variant);
            }
        }
        for n in 11..=20 {
            for variant in number_to_variants(n) {
                assert_eq!(text_to_number(&variant), Some(n), "{}", variant);
            }
        }
    }

    #[test]
    fn test_result_variants() {
        assert_eq!(result_variants(5.0), vec!["5", "오", "다섯", "five"]);
        assert_eq!(result_variants(2.5), vec!["2.5"]);
        assert_eq!(result_variants(-0.0), vec!["0", "영", "공", "zero"]);
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(3.33), "3.33");
    }

    #[test]
    fn test_extract_from_option_digits() {
        assert_eq!(extract_number_from_option("5번"), Some(5.0));
        assert_eq!(extract_number_from_option("10"), Some(10.0));
        assert_eq!(extract_number_from_option("Option 3"), Some(3.0));
        assert_eq!(extract_number_from_option("3번째 선택"), Some(3.0));
        assert_eq!(extract_number_from_option("3.14"), Some(3.14));
        assert_eq!(extract_number_from_option("3."), Some(3.0));
    }

    #[test]
    fn test_extract_from_option_korean() {
        assert_eq!(extract_number_from_option("답: 다섯"), Some(5.0));
        assert_eq!(extract_number_from_option("열"), Some(10.0));
        // longest word at the leftmost position
        assert_eq!(extract_number_from_option("일곱"), Some(7.0));
    }

    #[test]
    fn test_extract_from_option_english() {
        assert_eq!(extract_number_from_option("answer: five"), Some(5.0));
        assert_eq!(extract_number_from_option("ten"), Some(10.0));
        assert_eq!(extract_number_from_option("TWELVE"), Some(12.0));
        // whole words only
        assert_eq!(extract_number_from_option("someone"), None);
        assert_eq!(extract_number_from_option("no number here"), None);
    }

    #[test]
    fn test_extract_priority_digits_first() {
        assert_eq!(extract_number_from_option("five (5)"), Some(5.0));
        assert_eq!(extract_number_from_option("다섯 or 4"), Some(4.0));
    }
}
