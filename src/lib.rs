// Form autofill core
//
// - field_match: label → field category (exact / partial / fuzzy)
// - math: anti-bot arithmetic questions and numeral conversion
// - config: stored user values and auto-option toggles
// - pipeline: per-form fill plan built from the above
//
// The crate never installs a tracing subscriber; the host does.

pub mod config;
pub mod field_match;
pub mod math;
pub mod pipeline;

pub use config::{AutoOption, AutoOptionId, AutofillOptions, OptionsState, UserField};
pub use field_match::{
    match_field, match_fields, match_form_field, normalize, reset_fuzzy_index, FieldCategory,
    FieldMatchResult, FormFieldType, FormOption, KeywordDictionary, MatchTier, ParsedFormField,
    EXACT_THRESHOLD, MAX_THRESHOLD, MIN_FRAGMENT_LEN, MIN_SEARCH_TEXT_LEN, PARTIAL_THRESHOLD,
};
pub use math::{
    evaluate, extract_and_calculate, extract_expression, extract_number_from_option,
    number_to_variants, text_to_number,
};
pub use pipeline::{plan_autofill, AutofillPlan, FieldFillResult, FillAction, MathAnswer};

/// Route `tracing` output through the test harness
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_facade() {
        init_test_logging();
        reset_fuzzy_index();

        let result = match_field("Telegram ID", "").unwrap();
        assert_eq!(result.category, FieldCategory::Telegram);
        assert_eq!(result.tier, MatchTier::Exact);

        assert_eq!(extract_and_calculate("12 / 4 = ?"), Some(3.0));
        assert_eq!(text_to_number("셋"), Some(3));

        let mut state = OptionsState::default();
        state.update_user_field(FieldCategory::Telegram, "@nugul");
        let plan = plan_autofill(
            &[
                ParsedFormField::text("f1", "Telegram ID"),
                ParsedFormField::text("f2", "12 / 4 = ?"),
            ],
            &state,
        );
        assert_eq!(plan.filled_count, 2);
        assert_eq!(plan.filled_fields.len(), 1);
    }
}
