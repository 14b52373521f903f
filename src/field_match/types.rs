//! Field matching type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Tuning constants
// ============================================================================

/// Score treated as an exact match
pub const EXACT_THRESHOLD: f64 = 0.0;
/// Upper bound (inclusive) of the partial tier
pub const PARTIAL_THRESHOLD: f64 = 0.2;
/// Highest score still accepted as a match
pub const MAX_THRESHOLD: f64 = 0.4;
/// Search texts shorter than this (in chars, after normalization) are never classified
pub const MIN_SEARCH_TEXT_LEN: usize = 2;
/// Shortest shared fragment the fuzzy tier needs before it scores a keyword
pub const MIN_FRAGMENT_LEN: usize = 2;

// ============================================================================
// Canonical field categories
// ============================================================================

/// Canonical semantic category of a form field
///
/// The serialized form is the stored user-field id (`"evm_wallet"` etc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Telegram,
    Twitter,
    Discord,
    Email,
    Youtube,
    Phone,
    EvmWallet,
    SolanaWallet,
    Address,
}

impl FieldCategory {
    /// Every category, in dictionary order
    pub const ALL: [FieldCategory; 9] = [
        FieldCategory::Telegram,
        FieldCategory::Twitter,
        FieldCategory::Discord,
        FieldCategory::Email,
        FieldCategory::Youtube,
        FieldCategory::Phone,
        FieldCategory::EvmWallet,
        FieldCategory::SolanaWallet,
        FieldCategory::Address,
    ];

    /// Stored user-field id
    pub fn id(&self) -> &'static str {
        match self {
            FieldCategory::Telegram => "telegram",
            FieldCategory::Twitter => "twitter",
            FieldCategory::Discord => "discord",
            FieldCategory::Email => "email",
            FieldCategory::Youtube => "youtube",
            FieldCategory::Phone => "phone",
            FieldCategory::EvmWallet => "evm_wallet",
            FieldCategory::SolanaWallet => "solana_wallet",
            FieldCategory::Address => "address",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Default label shown for a stored user field
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldCategory::Telegram => "Telegram",
            FieldCategory::Twitter => "Twitter",
            FieldCategory::Discord => "Discord",
            FieldCategory::Email => "Email",
            FieldCategory::Youtube => "YouTube Channel",
            FieldCategory::Phone => "Phone Number",
            FieldCategory::EvmWallet => "EVM Wallet",
            FieldCategory::SolanaWallet => "Solana Wallet",
            FieldCategory::Address => "Home Address",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// Match results
// ============================================================================

/// Confidence tier of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Partial,
    Fuzzy,
}

impl MatchTier {
    /// Tier for a score, `None` once the score is past `MAX_THRESHOLD`
    pub fn from_score(score: f64) -> Option<Self> {
        if score <= EXACT_THRESHOLD {
            Some(MatchTier::Exact)
        } else if score <= PARTIAL_THRESHOLD {
            Some(MatchTier::Partial)
        } else if score <= MAX_THRESHOLD {
            Some(MatchTier::Fuzzy)
        } else {
            None
        }
    }
}

/// Classification of one form field
///
/// Lower score means higher confidence; `0.0` only for `MatchTier::Exact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatchResult {
    /// Matched category
    pub category: FieldCategory,
    /// Match score (0.0 - 1.0)
    pub score: f64,
    /// Tier that produced the match
    pub tier: MatchTier,
    /// Dictionary keyword that matched (as written in the dictionary)
    pub matched_keyword: String,
}

// ============================================================================
// Form descriptors (produced by the document-extraction side)
// ============================================================================

/// Form field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    #[default]
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
}

impl FormFieldType {
    /// Free-text input (text / textarea)
    pub fn is_text(&self) -> bool {
        matches!(self, FormFieldType::Text | FormFieldType::Textarea)
    }

    /// Radio group or checkbox group
    pub fn is_choice(&self) -> bool {
        matches!(self, FormFieldType::Radio | FormFieldType::Checkbox)
    }
}

/// One option of a radio / checkbox / select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormOption {
    /// Visible option text
    pub text: String,
    /// Whether the option is currently selected
    pub selected: bool,
}

impl FormOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
        }
    }
}

/// Parsed form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFormField {
    /// Opaque element identifier
    pub element_id: String,
    /// Label text detected for the field
    pub label: String,
    /// Placeholder text
    pub placeholder: String,
    /// Field kind
    pub field_type: FormFieldType,
    /// Whether the form marks the field as required
    #[serde(default)]
    pub required: bool,
    /// Value already present in the field
    #[serde(default)]
    pub current_value: String,
    /// Options, for choice fields
    #[serde(default)]
    pub options: Vec<FormOption>,
}

impl ParsedFormField {
    /// Text field with a label only
    pub fn text(element_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Choice field with the given option texts
    pub fn choice(
        element_id: impl Into<String>,
        label: impl Into<String>,
        field_type: FormFieldType,
        options: &[&str],
    ) -> Self {
        Self {
            element_id: element_id.into(),
            label: label.into(),
            field_type,
            options: options.iter().map(|t| FormOption::new(*t)).collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_score() {
        assert_eq!(MatchTier::from_score(0.0), Some(MatchTier::Exact));
        assert_eq!(MatchTier::from_score(0.05), Some(MatchTier::Partial));
        assert_eq!(MatchTier::from_score(0.2), Some(MatchTier::Partial));
        assert_eq!(MatchTier::from_score(0.3), Some(MatchTier::Fuzzy));
        assert_eq!(MatchTier::from_score(0.4), Some(MatchTier::Fuzzy));
        assert_eq!(MatchTier::from_score(0.41), None);
    }

    #[test]
    fn test_thresholds_ordered() {
        assert!(EXACT_THRESHOLD < PARTIAL_THRESHOLD);
        assert!(PARTIAL_THRESHOLD < MAX_THRESHOLD);
        assert!(MAX_THRESHOLD <= 1.0);
    }

    #[test]
    fn test_category_ids_roundtrip() {
        for category in FieldCategory::ALL {
            assert_eq!(FieldCategory::from_id(category.id()), Some(category));
        }
        assert_eq!(FieldCategory::from_id("linkedin"), None);
    }

    #[test]
    fn test_category_serde_uses_ids() {
        let json = serde_json::to_string(&FieldCategory::EvmWallet).unwrap();
        assert_eq!(json, "\"evm_wallet\"");
        let back: FieldCategory = serde_json::from_str("\"solana_wallet\"").unwrap();
        assert_eq!(back, FieldCategory::SolanaWallet);
    }

    #[test]
    fn test_parsed_field_deserialize() {
        let json = r#"{"elementId":"field_1","label":"Email","placeholder":"","fieldType":"text"}"#;
        let field: ParsedFormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.element_id, "field_1");
        assert_eq!(field.field_type, FormFieldType::Text);
        assert!(field.options.is_empty());
        assert!(!field.required);
    }
}
