//! Field matching engine
//!
//! Tiered classification of a label: exact → partial (substring) → fuzzy.
//! The first tier producing a candidate wins; exclusion keywords then veto it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::field_match::dictionary::KeywordDictionary;
use crate::field_match::fuzzy::FuzzyIndex;
use crate::field_match::normalizer::{char_len, normalize};
use crate::field_match::types::{
    FieldCategory, FieldMatchResult, MatchTier, ParsedFormField, MAX_THRESHOLD,
    MIN_SEARCH_TEXT_LEN,
};

lazy_static::lazy_static! {
    /// Process-wide fuzzy index, built on the first fuzzy-tier lookup
    ///
    /// `reset_fuzzy_index` drops it; the next lookup rebuilds it.
    static ref FUZZY_INDEX: RwLock<Option<Arc<FuzzyIndex>>> = RwLock::new(None);

    /// Keyword tables checked once, before the first lookup in any tier
    static ref DICTIONARY_VALID: bool = match KeywordDictionary::validate() {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("keyword dictionary failed validation: {:#}", e);
            false
        }
    };
}

/// Classify a form field from its label, falling back to the placeholder
///
/// Returns `None` when the text is too short, nothing matches well enough,
/// or the winning category is vetoed by one of its exclusion keywords.
pub fn match_field(label: &str, placeholder: &str) -> Option<FieldMatchResult> {
    lazy_static::initialize(&DICTIONARY_VALID);
    let search_text = search_text(label, placeholder);

    if char_len(&search_text) < MIN_SEARCH_TEXT_LEN {
        return None;
    }

    let candidate = find_exact_match(&search_text)
        .or_else(|| find_partial_match(&search_text))
        .or_else(|| find_fuzzy_match(&search_text))?;

    if KeywordDictionary::is_excluded(candidate.category, &search_text) {
        tracing::debug!(
            "field match vetoed by exclusion keyword: '{}' -> {}",
            search_text,
            candidate.category
        );
        return None;
    }

    tracing::debug!(
        "field matched: '{}' -> {} ({:?}, score {:.3}, keyword '{}')",
        search_text,
        candidate.category,
        candidate.tier,
        candidate.score,
        candidate.matched_keyword
    );

    Some(candidate)
}

/// Classify a parsed form field
pub fn match_form_field(field: &ParsedFormField) -> Option<FieldMatchResult> {
    match_field(&field.label, &field.placeholder)
}

/// Classify every field independently, keyed by element id
///
/// Several fields may map to the same category; resolving that is up to the caller.
pub fn match_fields(fields: &[ParsedFormField]) -> HashMap<String, Option<FieldMatchResult>> {
    fields
        .iter()
        .map(|field| (field.element_id.clone(), match_form_field(field)))
        .collect()
}

/// Drop the memoized fuzzy index; safe to call at any time
pub fn reset_fuzzy_index() {
    let mut guard = FUZZY_INDEX.write().unwrap_or_else(PoisonError::into_inner);
    if guard.take().is_some() {
        tracing::info!("fuzzy index reset");
    }
}

/// Normalized label, or the normalized placeholder when the label is empty
///
/// A label of symbols or spaces still counts as present and usually normalizes
/// to nothing, so the field stays unclassified.
fn search_text(label: &str, placeholder: &str) -> String {
    if label.is_empty() {
        normalize(placeholder)
    } else {
        normalize(label)
    }
}

/// Exact tier: search text equals a normalized keyword
fn find_exact_match(search_text: &str) -> Option<FieldMatchResult> {
    for entry in KeywordDictionary::entries() {
        for keyword in entry.keywords {
            if normalize(keyword) == search_text {
                return Some(FieldMatchResult {
                    category: entry.category,
                    score: 0.0,
                    tier: MatchTier::Exact,
                    matched_keyword: keyword.to_string(),
                });
            }
        }
    }
    None
}

/// Partial tier: substring containment in either direction, lowest score wins
fn find_partial_match(search_text: &str) -> Option<FieldMatchResult> {
    let text_len = char_len(search_text) as f64;
    let mut best: Option<FieldMatchResult> = None;
    let mut best_score = 1.0;

    for entry in KeywordDictionary::entries() {
        for keyword in entry.keywords {
            let normalized = normalize(keyword);
            if normalized.is_empty() {
                continue;
            }
            let keyword_len = char_len(&normalized) as f64;

            // label contains keyword: longer keywords relative to the label score lower
            if search_text.contains(normalized.as_str()) {
                let score = ((1.0 - keyword_len / text_len) * 0.2).max(0.01);
                if score < best_score {
                    best_score = score;
                    best = Some(partial(entry.category, score, keyword));
                }
            }

            // keyword contains label
            if normalized.contains(search_text) && text_len >= 3.0 {
                let score = ((1.0 - text_len / keyword_len) * 0.3).max(0.05);
                if score < best_score {
                    best_score = score;
                    best = Some(partial(entry.category, score, keyword));
                }
            }
        }
    }

    best
}

fn partial(category: FieldCategory, score: f64, keyword: &str) -> FieldMatchResult {
    FieldMatchResult {
        category,
        score,
        tier: MatchTier::Partial,
        matched_keyword: keyword.to_string(),
    }
}

/// Fuzzy tier: best edit-distance hit, rejected above `MAX_THRESHOLD`
fn find_fuzzy_match(search_text: &str) -> Option<FieldMatchResult> {
    let hit = fuzzy_index().search(search_text)?;

    if hit.score > MAX_THRESHOLD {
        return None;
    }
    let tier = MatchTier::from_score(hit.score)?;

    Some(FieldMatchResult {
        category: hit.category,
        score: hit.score,
        tier,
        matched_keyword: hit.keyword.to_string(),
    })
}

/// Shared fuzzy index, building it on first use
fn fuzzy_index() -> Arc<FuzzyIndex> {
    {
        let guard = FUZZY_INDEX.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = guard.as_ref() {
            return Arc::clone(index);
        }
    }

    let mut guard = FUZZY_INDEX.write().unwrap_or_else(PoisonError::into_inner);
    // another caller may have built it between the two locks
    if let Some(index) = guard.as_ref() {
        return Arc::clone(index);
    }

    let index = Arc::new(FuzzyIndex::new(KeywordDictionary::entries()));
    tracing::info!("fuzzy index built: {} keywords", index.len());
    *guard = Some(Arc::clone(&index));
    index
}
