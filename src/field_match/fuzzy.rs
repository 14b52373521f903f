//! Approximate keyword search
//!
//! Edit-distance scoring between a search text and every dictionary keyword.
//! Location-agnostic: the search text may align with any stretch of a keyword.

use strsim::normalized_levenshtein;

use crate::field_match::dictionary::CategoryKeywords;
use crate::field_match::normalizer::normalize;
use crate::field_match::types::{FieldCategory, MIN_FRAGMENT_LEN};

/// Lowest score a fuzzy hit can carry; 0.0 is reserved for exact matches
pub const MIN_FUZZY_SCORE: f64 = 0.001;

/// Search index over the normalized keyword dictionary
pub struct FuzzyIndex {
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    category: FieldCategory,
    /// Keyword as written in the dictionary
    keyword: &'static str,
    /// Normalized keyword
    normalized: String,
    /// Normalized keyword, as chars
    chars: Vec<char>,
}

/// Best fuzzy hit
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit {
    pub category: FieldCategory,
    pub keyword: &'static str,
    /// Score (0.0 - 1.0), lower is closer
    pub score: f64,
}

impl FuzzyIndex {
    /// Build the index
    ///
    /// # Arguments
    /// * `dictionary` - category keyword tables, in priority order
    pub fn new(dictionary: &[CategoryKeywords]) -> Self {
        let entries = dictionary
            .iter()
            .flat_map(|entry| {
                entry.keywords.iter().map(move |keyword| {
                    let normalized = normalize(keyword);
                    let chars = normalized.chars().collect();
                    IndexEntry {
                        category: entry.category,
                        keyword,
                        normalized,
                        chars,
                    }
                })
            })
            .filter(|e| !e.chars.is_empty())
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-scoring keyword for `text`
    ///
    /// Ties on edit distance go to the keyword closest overall, then to
    /// dictionary order. No threshold is applied here.
    pub fn search(&self, text: &str) -> Option<FuzzyHit> {
        let query = normalize(text);
        let pattern: Vec<char> = query.chars().collect();
        if pattern.len() < MIN_FRAGMENT_LEN || self.entries.is_empty() {
            return None;
        }

        // (entry index, distance, overall similarity)
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, entry) in self.entries.iter().enumerate() {
            if !shares_fragment(&pattern, &entry.chars, MIN_FRAGMENT_LEN) {
                continue;
            }

            let distance = substring_distance(&pattern, &entry.chars);
            let similarity = normalized_levenshtein(&query, &entry.normalized);

            let better = match best {
                None => true,
                Some((_, best_distance, best_similarity)) => {
                    distance < best_distance
                        || (distance == best_distance && similarity > best_similarity)
                }
            };
            if better {
                best = Some((i, distance, similarity));
            }
        }

        best.map(|(i, distance, _)| {
            let entry = &self.entries[i];
            FuzzyHit {
                category: entry.category,
                keyword: entry.keyword,
                score: score_from_distance(distance, pattern.len()),
            }
        })
    }
}

/// Score for `distance` edits over a pattern of `pattern_len` chars
///
/// Strictly increasing in `distance`, clamped to `[MIN_FUZZY_SCORE, 1.0]`.
pub fn score_from_distance(distance: usize, pattern_len: usize) -> f64 {
    if pattern_len == 0 {
        return 1.0;
    }
    (distance as f64 / pattern_len as f64).clamp(MIN_FUZZY_SCORE, 1.0)
}

/// Fewest edits turning `pattern` into some substring of `text`
///
/// Semi-global alignment: skipping a prefix or suffix of `text` is free.
/// Never exceeds `pattern.len()`.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    // prev[j]: cost of aligning the first i pattern chars ending at text[..j]
    let mut prev = vec![0usize; text.len() + 1];
    let mut curr = vec![0usize; text.len() + 1];

    for i in 1..=pattern.len() {
        curr[0] = i;
        for j in 1..=text.len() {
            let substitute = prev[j - 1] + usize::from(pattern[i - 1] != text[j - 1]);
            let delete = prev[j] + 1;
            let insert = curr[j - 1] + 1;
            curr[j] = substitute.min(delete).min(insert);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.iter().copied().min().unwrap_or(pattern.len())
}

/// Whether `a` and `b` share a run of at least `min_len` identical chars
fn shares_fragment(a: &[char], b: &[char], min_len: usize) -> bool {
    if min_len == 0 {
        return true;
    }
    if a.len() < min_len || b.len() < min_len {
        return false;
    }
    a.windows(min_len)
        .any(|window| b.windows(min_len).any(|other| other == window))
}
