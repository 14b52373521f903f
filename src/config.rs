// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::field_match::FieldCategory;

// ============================================================================
// Stored user fields
// ============================================================================

/// A value the user saved for one field category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserField {
    /// Category id (`"telegram"`, `"evm_wallet"` ...)
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub placeholder: String,
}

impl UserField {
    /// Empty field for `category` with its default label and placeholder
    pub fn empty(category: FieldCategory) -> Self {
        let placeholder = match category {
            FieldCategory::Telegram | FieldCategory::Twitter | FieldCategory::Discord => {
                "@username"
            }
            FieldCategory::Email => "email@example.com",
            FieldCategory::Youtube => "@channelname",
            FieldCategory::Phone => "010-1234-5678",
            FieldCategory::EvmWallet => "0x...",
            FieldCategory::SolanaWallet => "solana wallet address",
            FieldCategory::Address => "123 Main St, City, State 12345",
        };
        Self {
            id: category.id().to_string(),
            label: category.display_name().to_string(),
            value: String::new(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn category(&self) -> Option<FieldCategory> {
        FieldCategory::from_id(&self.id)
    }
}

// ============================================================================
// Auto options
// ============================================================================

/// Behaviour toggle identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoOptionId {
    /// Pick the affirmative answer ("yes", "동의" ...) on choice fields
    PositiveAutoSelect,
    /// Pick the first option when nothing affirmative is offered
    FallbackAutoSelect,
    /// Show the floating fill button (host UI only)
    FloatingButton,
    /// Answer arithmetic verification questions
    MathAutoAnswer,
}

impl AutoOptionId {
    pub const ALL: [AutoOptionId; 4] = [
        AutoOptionId::PositiveAutoSelect,
        AutoOptionId::FallbackAutoSelect,
        AutoOptionId::FloatingButton,
        AutoOptionId::MathAutoAnswer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoOptionId::PositiveAutoSelect => "positiveAutoSelect",
            AutoOptionId::FallbackAutoSelect => "fallbackAutoSelect",
            AutoOptionId::FloatingButton => "floatingButton",
            AutoOptionId::MathAutoAnswer => "mathAutoAnswer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoOption {
    pub id: AutoOptionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
}

impl AutoOption {
    /// Factory setting for `id`
    pub fn default_for(id: AutoOptionId) -> Self {
        let (title, description, enabled) = match id {
            AutoOptionId::PositiveAutoSelect => (
                "긍정 응답 자동 선택",
                "긍정적인 선택지를 자동으로 선택합니다. (예: 네, Yes, OK 등)",
                true,
            ),
            AutoOptionId::FallbackAutoSelect => (
                "기본 응답 자동 선택",
                "필수 항목이 비어있을 때 첫번째 선택지를 사용합니다.",
                false,
            ),
            AutoOptionId::FloatingButton => (
                "Floating 버튼 표시",
                "페이지 우측 하단에 플로팅 버튼을 표시합니다.",
                true,
            ),
            AutoOptionId::MathAutoAnswer => (
                "봇 방지 수식 자동 계산",
                "수식 문제를 자동으로 계산하여 답변합니다. (예: 2 + 3 = ?)",
                true,
            ),
        };
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            enabled,
        }
    }
}

// ============================================================================
// Options state
// ============================================================================

/// Everything the filler reads from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsState {
    pub user_fields: Vec<UserField>,
    pub auto_options: Vec<AutoOption>,
}

impl Default for OptionsState {
    fn default() -> Self {
        Self {
            user_fields: FieldCategory::ALL.into_iter().map(UserField::empty).collect(),
            auto_options: AutoOptionId::ALL
                .into_iter()
                .map(AutoOption::default_for)
                .collect(),
        }
    }
}

impl OptionsState {
    /// Parse stored options JSON
    ///
    /// A missing `userFields` or `autoOptions` key falls back to the defaults.
    /// Auto-option entries that do not parse (unknown id etc) are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let v: serde_json::Value =
            serde_json::from_str(json).context("options state is not valid JSON")?;

        if !v.is_object() {
            anyhow::bail!("options state must be a JSON object");
        }

        let mut state = OptionsState::default();

        if let Some(user_fields) = v.get("userFields") {
            state.user_fields = serde_json::from_value(user_fields.clone())
                .context("failed to parse userFields")?;
        }

        if let Some(auto_options) = v.get("autoOptions") {
            let entries = auto_options
                .as_array()
                .ok_or_else(|| anyhow::anyhow!("autoOptions must be an array"))?;

            state.auto_options = entries
                .iter()
                .filter_map(|entry| match serde_json::from_value::<AutoOption>(entry.clone()) {
                    Ok(option) => Some(option),
                    Err(e) => {
                        tracing::warn!("ignoring auto option {}: {}", entry, e);
                        None
                    }
                })
                .collect();
        }

        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Missing options count as disabled
    pub fn is_option_enabled(&self, id: AutoOptionId) -> bool {
        self.auto_options
            .iter()
            .find(|opt| opt.id == id)
            .map(|opt| opt.enabled)
            .unwrap_or(false)
    }

    /// Stored field for `category`, if it holds a value
    pub fn user_field(&self, category: FieldCategory) -> Option<&UserField> {
        self.user_fields
            .iter()
            .find(|f| f.id == category.id())
            .filter(|f| f.has_value())
    }

    /// Set the stored value; returns false when no field has that category
    pub fn update_user_field(&mut self, category: FieldCategory, value: &str) -> bool {
        match self.user_fields.iter_mut().find(|f| f.id == category.id()) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear_user_field(&mut self, category: FieldCategory) -> bool {
        self.update_user_field(category, "")
    }

    /// Returns false when the option is not present
    pub fn set_auto_option(&mut self, id: AutoOptionId, enabled: bool) -> bool {
        match self.auto_options.iter_mut().find(|opt| opt.id == id) {
            Some(option) => {
                option.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn toggle_auto_option(&mut self, id: AutoOptionId) -> bool {
        let enabled = self.is_option_enabled(id);
        self.set_auto_option(id, !enabled)
    }
}

// ============================================================================
// Resolved fill behaviour
// ============================================================================

/// The toggles the filler acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutofillOptions {
    pub positive_select: bool,
    pub fallback_select: bool,
    pub math_answer: bool,
}

impl AutofillOptions {
    pub fn from_state(state: &OptionsState) -> Self {
        Self {
            positive_select: state.is_option_enabled(AutoOptionId::PositiveAutoSelect),
            fallback_select: state.is_option_enabled(AutoOptionId::FallbackAutoSelect),
            math_answer: state.is_option_enabled(AutoOptionId::MathAutoAnswer),
        }
    }
}
