// Pipeline types
//
// The fill plan produced for a parsed form:
// - FillAction: what the host should do to one element
// - FieldFillResult: per-field outcome, successful or not
// - AutofillPlan: all of the above plus the categories the user still has to fill in

use std::fmt;

use serde::{Deserialize, Serialize};

/// One change to apply to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillAction {
    /// Type `value` into a text field
    #[serde(rename_all = "camelCase")]
    Type { element_id: String, value: String },
    /// Click option `option_index` of a radio / checkbox field
    #[serde(rename_all = "camelCase")]
    Select {
        element_id: String,
        option_index: usize,
    },
}

impl FillAction {
    pub fn element_id(&self) -> &str {
        match self {
            FillAction::Type { element_id, .. } => element_id,
            FillAction::Select { element_id, .. } => element_id,
        }
    }
}

/// Why a field was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    #[serde(rename = "Field already has value")]
    AlreadyFilled,
    #[serde(rename = "No saved value for matched field")]
    NoSavedValue,
    #[serde(rename = "No matching user field found")]
    NoMatch,
    #[serde(rename = "Selection skipped or failed")]
    SelectionSkipped,
}

impl FailReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailReason::AlreadyFilled => "Field already has value",
            FailReason::NoSavedValue => "No saved value for matched field",
            FailReason::NoMatch => "No matching user field found",
            FailReason::SelectionSkipped => "Selection skipped or failed",
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFillResult {
    /// Label as it appears on the form
    pub form_label: String,
    /// Matched category id, if any
    pub user_field_id: Option<String>,
    pub filled: bool,
    /// Typed text or chosen option text; empty when not filled
    pub filled_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_reason: Option<FailReason>,
}

impl FieldFillResult {
    pub fn filled(form_label: &str, user_field_id: Option<&str>, value: &str) -> Self {
        Self {
            form_label: form_label.to_string(),
            user_field_id: user_field_id.map(str::to_string),
            filled: true,
            filled_value: value.to_string(),
            fail_reason: None,
        }
    }

    pub fn failed(form_label: &str, user_field_id: Option<&str>, reason: FailReason) -> Self {
        Self {
            form_label: form_label.to_string(),
            user_field_id: user_field_id.map(str::to_string),
            filled: false,
            filled_value: String::new(),
            fail_reason: Some(reason),
        }
    }
}

/// A stored user value that made it into the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledField {
    pub field_id: String,
    pub form_label: String,
    /// Label of the stored user field
    pub field_label: String,
    pub filled_value: String,
}

/// Everything planned for one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutofillPlan {
    pub actions: Vec<FillAction>,
    pub field_results: Vec<FieldFillResult>,
    /// Matched categories left unfilled, deduplicated in first-seen order
    pub missing_field_ids: Vec<String>,
    pub filled_fields: Vec<FilledField>,
    pub filled_count: usize,
}

/// Computed answer to an arithmetic question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathAnswer {
    pub value: f64,
    /// Accepted spellings, digit form first
    pub variants: Vec<String>,
    /// Option carrying the answer, for choice questions
    pub option_index: Option<usize>,
}

impl MathAnswer {
    /// Text to type into a free-text answer field
    pub fn text(&self) -> &str {
        self.variants.first().map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_reason_serializes_as_message() {
        let json = serde_json::to_string(&FailReason::NoSavedValue).unwrap();
        assert_eq!(json, "\"No saved value for matched field\"");
        assert_eq!(FailReason::NoMatch.to_string(), "No matching user field found");
    }

    #[test]
    fn test_action_serialization() {
        let action = FillAction::Select {
            element_id: "field_1".to_string(),
            option_index: 2,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "select");
        assert_eq!(json["elementId"], "field_1");
        assert_eq!(json["optionIndex"], 2);
        assert_eq!(action.element_id(), "field_1");
    }

    #[test]
    fn test_fill_result_omits_missing_reason() {
        let result = FieldFillResult::filled("Email", Some("email"), "a@b.com");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("failReason").is_none());
        assert_eq!(json["userFieldId"], "email");
    }
}
