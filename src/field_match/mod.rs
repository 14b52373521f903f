//! Field matching - form-field label classification
//!
//! Maps a noisy, multilingual label to a canonical field category.
//!
//! ## Flow
//! 1. Normalize label (or placeholder when the label is empty)
//! 2. Exact keyword match → score 0
//! 3. Substring containment either way → score < 0.2
//! 4. Edit-distance search over the memoized keyword index → score <= 0.4
//! 5. Exclusion keywords of the winning category veto the result

mod dictionary;
mod engine;
mod fuzzy;
mod normalizer;
mod types;

pub use dictionary::{CategoryKeywords, KeywordDictionary, POSITIVE_KEYWORDS};
pub use engine::{match_field, match_fields, match_form_field, reset_fuzzy_index};
pub use fuzzy::{FuzzyHit, FuzzyIndex};
pub use normalizer::normalize;
pub use types::*;
