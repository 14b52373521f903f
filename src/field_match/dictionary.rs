//! Keyword dictionary
//!
//! Trigger keywords and exclusion keywords per field category, plus the
//! positive-answer keywords used for radio/checkbox auto-selection.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::field_match::normalizer::normalize;
use crate::field_match::types::FieldCategory;

/// Keywords owned by one category
#[derive(Debug)]
pub struct CategoryKeywords {
    pub category: FieldCategory,
    /// Full words, abbreviations, English and Korean spellings
    pub keywords: &'static [&'static str],
    /// Presence of any of these in the search text vetoes the category
    pub exclusions: &'static [&'static str],
}

static DICTIONARY: &[CategoryKeywords] = &[
    CategoryKeywords {
        category: FieldCategory::Telegram,
        keywords: &[
            "telegram",
            "tele",
            "tg",
            "telegram handle",
            "telegram id",
            "telegram username",
            "telegram account",
            "텔레그램",
            "텔레",
            "텔그램",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::Twitter,
        keywords: &[
            "twitter",
            "twit",
            "x",
            "x handle",
            "twitter handle",
            "twitter id",
            "twitter username",
            "twitter account",
            "x account",
            "x id",
            "x username",
            "트위터",
            "엑스",
        ],
        // a profile link is a different answer than the handle itself
        exclusions: &["link", "url", "http", "www", "링크"],
    },
    CategoryKeywords {
        category: FieldCategory::Discord,
        keywords: &[
            "discord",
            "disc",
            "discord handle",
            "discord id",
            "discord username",
            "discord account",
            "discord tag",
            "디스코드",
            "디코",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::Email,
        keywords: &[
            "email",
            "e-mail",
            "mail",
            "email address",
            "email id",
            "your email",
            "contact email",
            "이메일",
            "메일",
            "이메일 주소",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::Youtube,
        keywords: &[
            "youtube",
            "yt",
            "youtube channel",
            "youtube handle",
            "youtube account",
            "youtube url",
            "youtube link",
            "channel url",
            "유튜브",
            "유튜브 채널",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::Phone,
        keywords: &[
            "phone",
            "phone number",
            "mobile",
            "mobile number",
            "cell",
            "cell phone",
            "telephone",
            "tel",
            "contact number",
            "전화번호",
            "핸드폰",
            "휴대폰",
            "연락처",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::EvmWallet,
        keywords: &[
            "wallet",
            "evm",
            "evm wallet",
            "evm address",
            "ethereum",
            "eth",
            "eth wallet",
            "eth address",
            "ethereum wallet",
            "ethereum address",
            "wallet address",
            "metamask",
            "crypto wallet",
            "지갑",
            "지갑 주소",
            "evm 지갑",
            "이더리움",
            "이더리움 지갑",
            "메타마스크",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::SolanaWallet,
        keywords: &[
            "solana",
            "sol",
            "sol wallet",
            "sol address",
            "solana wallet",
            "solana address",
            "phantom",
            "solflare",
            "솔라나",
            "솔라나 지갑",
        ],
        exclusions: &[],
    },
    CategoryKeywords {
        category: FieldCategory::Address,
        keywords: &[
            "address",
            "home address",
            "shipping address",
            "mailing address",
            "street address",
            "delivery address",
            "주소",
            "집 주소",
            "배송지",
            "배송 주소",
            "우편 주소",
        ],
        exclusions: &[],
    },
];

/// Positive-answer keywords (substring match on lower-cased option text)
pub static POSITIVE_KEYWORDS: &[&str] = &[
    // English
    "yes",
    "y",
    "ok",
    "okay",
    "agree",
    "accept",
    "confirm",
    "i agree",
    "i accept",
    "i confirm",
    "true",
    // Korean
    "예",
    "네",
    "동의",
    "동의합니다",
    "동의함",
    "수락",
    "확인",
    "승인",
];

/// Read-only, process-wide keyword dictionary
pub struct KeywordDictionary;

impl KeywordDictionary {
    /// All categories in priority order
    pub fn entries() -> &'static [CategoryKeywords] {
        DICTIONARY
    }

    pub fn keywords_for(category: FieldCategory) -> &'static [&'static str] {
        Self::entry(category).map(|e| e.keywords).unwrap_or(&[])
    }

    pub fn exclusions_for(category: FieldCategory) -> &'static [&'static str] {
        Self::entry(category).map(|e| e.exclusions).unwrap_or(&[])
    }

    /// Whether the normalized search text contains an exclusion keyword of `category`
    pub fn is_excluded(category: FieldCategory, search_text: &str) -> bool {
        Self::exclusions_for(category).iter().any(|keyword| {
            let normalized = normalize(keyword);
            !normalized.is_empty() && search_text.contains(normalized.as_str())
        })
    }

    /// Total number of trigger keywords
    pub fn keyword_count() -> usize {
        DICTIONARY.iter().map(|e| e.keywords.len()).sum()
    }

    /// Structural checks on the static tables
    ///
    /// A failure here is a programming error in the tables above.
    pub fn validate() -> Result<()> {
        let mut owner: HashMap<String, FieldCategory> = HashMap::new();

        for category in FieldCategory::ALL {
            if Self::entry(category).is_none() {
                bail!("category `{}` has no dictionary entry", category);
            }
        }

        for entry in DICTIONARY {
            if entry.keywords.is_empty() {
                bail!("category `{}` has no keywords", entry.category);
            }

            let mut seen: HashSet<String> = HashSet::new();
            for keyword in entry.keywords {
                let normalized = normalize(keyword);
                if normalized.is_empty() {
                    bail!("keyword {:?} of `{}` normalizes to nothing", keyword, entry.category);
                }
                if !seen.insert(normalized.clone()) {
                    bail!("duplicate keyword {:?} in `{}`", keyword, entry.category);
                }
                if let Some(other) = owner.insert(normalized, entry.category) {
                    if other != entry.category {
                        bail!(
                            "keyword {:?} is shared by `{}` and `{}`",
                            keyword,
                            other,
                            entry.category
                        );
                    }
                }
            }

            for exclusion in entry.exclusions {
                if normalize(exclusion).is_empty() {
                    bail!(
                        "exclusion {:?} of `{}` normalizes to nothing",
                        exclusion,
                        entry.category
                    );
                }
            }
        }

        Ok(())
    }

    fn entry(category: FieldCategory) -> Option<&'static CategoryKeywords> {
        DICTIONARY.iter().find(|e| e.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_is_valid() {
        KeywordDictionary::validate().unwrap();
    }

    #[test]
    fn test_every_category_has_keywords() {
        for category in FieldCategory::ALL {
            assert!(
                !KeywordDictionary::keywords_for(category).is_empty(),
                "{} has no keywords",
                category
            );
        }
    }

    #[test]
    fn test_every_category_has_korean_and_english() {
        let has_hangul = |s: &str| s.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c));
        for category in FieldCategory::ALL {
            let keywords = KeywordDictionary::keywords_for(category);
            assert!(keywords.iter().any(|k| has_hangul(k)), "{}", category);
            assert!(keywords.iter().any(|k| k.is_ascii()), "{}", category);
        }
    }

    #[test]
    fn test_twitter_exclusions() {
        let exclusions = KeywordDictionary::exclusions_for(FieldCategory::Twitter);
        assert!(exclusions.contains(&"link"));
        assert!(exclusions.contains(&"url"));
        assert!(KeywordDictionary::is_excluded(FieldCategory::Twitter, "twitter url"));
        assert!(KeywordDictionary::is_excluded(FieldCategory::Twitter, "트위터 https 주소"));
        assert!(!KeywordDictionary::is_excluded(FieldCategory::Twitter, "twitter handle"));
    }

    #[test]
    fn test_no_exclusions_on_email() {
        assert!(KeywordDictionary::exclusions_for(FieldCategory::Email).is_empty());
        assert!(!KeywordDictionary::is_excluded(FieldCategory::Email, "email url"));
    }

    #[test]
    fn test_positive_keywords() {
        assert!(POSITIVE_KEYWORDS.len() >= 5);
        for keyword in ["yes", "y", "ok", "예", "네", "동의"] {
            assert!(POSITIVE_KEYWORDS.contains(&keyword), "{}", keyword);
        }
        let unique: HashSet<&&str> = POSITIVE_KEYWORDS.iter().collect();
        assert_eq!(unique.len(), POSITIVE_KEYWORDS.len());
    }

    #[test]
    fn test_keyword_count() {
        assert!(KeywordDictionary::keyword_count() > FieldCategory::ALL.len());
    }
}
