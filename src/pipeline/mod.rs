// Pipeline module - fill planning
//
// Turns parsed form fields and the stored options into an AutofillPlan:
// - text / textarea: stored value of the matched category, or a math answer
// - radio / checkbox: math answer option, stored value, then positive / fallback selection
// - select: left alone
//
// The plan is pure data; applying it to a page is up to the host.

mod selection;
mod types;

pub use selection::{find_math_answer, is_positive_option, select_option, select_option_by_value};
pub use types::*;

use crate::config::{AutofillOptions, OptionsState};
use crate::field_match::{match_form_field, FieldMatchResult, ParsedFormField};

/// Plan the autofill of `fields` from the stored `state`
pub fn plan_autofill(fields: &[ParsedFormField], state: &OptionsState) -> AutofillPlan {
    let autofill = AutofillOptions::from_state(state);
    let mut plan = AutofillPlan::default();

    for field in fields {
        if field.field_type.is_text() {
            plan_text_field(field, state, autofill, &mut plan);
        } else if field.field_type.is_choice() {
            plan_choice_field(field, state, autofill, &mut plan);
        }
    }

    tracing::info!(
        "autofill plan: {} of {} fields filled, {} missing",
        plan.filled_count,
        fields.len(),
        plan.missing_field_ids.len()
    );

    plan
}

fn plan_text_field(
    field: &ParsedFormField,
    state: &OptionsState,
    autofill: AutofillOptions,
    plan: &mut AutofillPlan,
) {
    let matched = match_form_field(field);
    let has_value = !field.current_value.trim().is_empty();

    let Some(matched) = matched else {
        // unmatched fields may still be an arithmetic question
        if autofill.math_answer && !has_value {
            if let Some(answer) = find_math_answer(&field.label, &[]) {
                let value = answer.text().to_string();
                plan.actions.push(FillAction::Type {
                    element_id: field.element_id.clone(),
                    value: value.clone(),
                });
                plan.field_results
                    .push(FieldFillResult::filled(&field.label, None, &value));
                plan.filled_count += 1;
                return;
            }
        }
        plan.field_results
            .push(FieldFillResult::failed(&field.label, None, FailReason::NoMatch));
        return;
    };

    let category_id = matched.category.id();

    let Some(user_field) = state.user_field(matched.category) else {
        push_missing(plan, category_id);
        plan.field_results.push(FieldFillResult::failed(
            &field.label,
            Some(category_id),
            FailReason::NoSavedValue,
        ));
        return;
    };

    if has_value {
        push_missing(plan, category_id);
        plan.field_results.push(FieldFillResult::failed(
            &field.label,
            Some(category_id),
            FailReason::AlreadyFilled,
        ));
        return;
    }

    plan.actions.push(FillAction::Type {
        element_id: field.element_id.clone(),
        value: user_field.value.clone(),
    });
    plan.field_results.push(FieldFillResult::filled(
        &field.label,
        Some(category_id),
        &user_field.value,
    ));
    plan.filled_fields.push(FilledField {
        field_id: category_id.to_string(),
        form_label: field.label.clone(),
        field_label: user_field.label.clone(),
        filled_value: user_field.value.clone(),
    });
    plan.filled_count += 1;
}

fn plan_choice_field(
    field: &ParsedFormField,
    state: &OptionsState,
    autofill: AutofillOptions,
    plan: &mut AutofillPlan,
) {
    let already_selected = field.options.iter().any(|opt| opt.selected);

    let choice = if already_selected {
        None
    } else {
        choose_option(field, state, autofill)
    };

    match choice.and_then(|(index, by)| field.options.get(index).map(|opt| (index, by, opt))) {
        Some((index, user_field_id, option)) => {
            plan.actions.push(FillAction::Select {
                element_id: field.element_id.clone(),
                option_index: index,
            });
            plan.field_results.push(FieldFillResult::filled(
                &field.label,
                user_field_id,
                &option.text,
            ));
            plan.filled_count += 1;
        }
        None => {
            plan.field_results.push(FieldFillResult::failed(
                &field.label,
                None,
                FailReason::SelectionSkipped,
            ));
        }
    }
}

/// Option index to click, with the category id when a stored value decided it
fn choose_option(
    field: &ParsedFormField,
    state: &OptionsState,
    autofill: AutofillOptions,
) -> Option<(usize, Option<&'static str>)> {
    if autofill.math_answer {
        if let Some(index) =
            find_math_answer(&field.label, &field.options).and_then(|a| a.option_index)
        {
            return Some((index, None));
        }
    }

    if let Some(FieldMatchResult { category, .. }) = match_form_field(field) {
        if let Some(user_field) = state.user_field(category) {
            if let Some(index) = select_option_by_value(&field.options, &user_field.value) {
                return Some((index, Some(category.id())));
            }
        }
    }

    select_option(&field.options, autofill).map(|index| (index, None))
}

fn push_missing(plan: &mut AutofillPlan, category_id: &str) {
    if !plan.missing_field_ids.iter().any(|id| id == category_id) {
        plan.missing_field_ids.push(category_id.to_string());
    }
}
