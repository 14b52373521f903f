// Option picking for choice fields
//
// Affirmative answers, stored values and computed math answers are all
// resolved to an option index here; the pipeline turns that into an action.

use aho_corasick::AhoCorasick;

use crate::config::AutofillOptions;
use crate::field_match::{FormOption, POSITIVE_KEYWORDS};
use crate::math::{
    extract_and_calculate, extract_number_from_option, is_math_question, result_variants,
};
use crate::pipeline::types::MathAnswer;

lazy_static::lazy_static! {
    static ref POSITIVE_SCANNER: Option<AhoCorasick> = match AhoCorasick::new(POSITIVE_KEYWORDS) {
        Ok(scanner) => Some(scanner),
        Err(e) => {
            tracing::error!("failed to build positive keyword scanner: {}", e);
            None
        }
    };
}

/// Whether the option text reads as an affirmative answer
///
/// Substring match on the trimmed, lower-cased text.
pub fn is_positive_option(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    match POSITIVE_SCANNER.as_ref() {
        Some(scanner) => scanner.is_match(&normalized),
        None => POSITIVE_KEYWORDS.iter().any(|k| normalized.contains(k)),
    }
}

/// Option to select automatically
///
/// Nothing is chosen when the field already has a selection.
pub fn select_option(options: &[FormOption], autofill: AutofillOptions) -> Option<usize> {
    if options.is_empty() || options.iter().any(|opt| opt.selected) {
        return None;
    }

    if autofill.positive_select {
        if let Some(index) = options.iter().position(|opt| is_positive_option(&opt.text)) {
            return Some(index);
        }
    }

    if autofill.fallback_select {
        return Some(0);
    }

    None
}

/// First option whose text contains `value` or is contained in it (case-insensitive)
pub fn select_option_by_value(options: &[FormOption], value: &str) -> Option<usize> {
    let value = value.to_lowercase();
    if value.is_empty() {
        return None;
    }

    options.iter().position(|opt| {
        let text = opt.text.to_lowercase();
        text.contains(&value) || value.contains(&text)
    })
}

/// Solve the question and locate the answer among `options`
///
/// Options are compared by the number they spell first, then by exact text
/// against every variant. `option_index` is `None` for free-text questions.
/// Labels that merely contain numbers (dates, phone numbers) are not questions.
pub fn find_math_answer(question: &str, options: &[FormOption]) -> Option<MathAnswer> {
    if !is_math_question(question) {
        return None;
    }
    let value = extract_and_calculate(question)?;
    let variants = result_variants(value);

    let option_index = options
        .iter()
        .position(|opt| extract_number_from_option(&opt.text) == Some(value))
        .or_else(|| {
            options.iter().position(|opt| {
                let text = opt.text.trim().to_lowercase();
                variants.iter().any(|v| *v == text)
            })
        });

    tracing::debug!(
        "math question '{}' = {} (option {:?})",
        question,
        value,
        option_index
    );

    Some(MathAnswer {
        value,
        variants,
        option_index,
    })
}
