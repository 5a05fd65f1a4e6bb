//! Translation table validation.
//!
//! Checks that both languages define the same keys and that every entry uses
//! the same `{placeholder}` names as its counterpart, so `resolve_with` fills
//! the same slots whatever the active language.

use crate::i18n::Language;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Validation report containing errors and warnings about the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys missing from one language, or placeholder mismatches
    pub errors: Vec<String>,

    /// Entries that are suspicious but harmless (empty values)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for the bilingual translation tables.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate the shipped Turkish and English tables against each other.
    pub fn validate_tables() -> ValidationReport {
        Self::validate_pair(
            (Language::TURKISH, Language::TURKISH.config().entries),
            (Language::ENGLISH, Language::ENGLISH.config().entries),
        )
    }

    /// Compare two (language, entries) tables.
    pub fn validate_pair(
        left: (Language, &[(&str, &str)]),
        right: (Language, &[(&str, &str)]),
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let (left_lang, left_entries) = left;
        let (right_lang, right_entries) = right;

        let left_map: BTreeMap<&str, &str> = left_entries.iter().copied().collect();
        let right_map: BTreeMap<&str, &str> = right_entries.iter().copied().collect();

        for key in left_map.keys().filter(|k| !right_map.contains_key(*k)) {
            report
                .errors
                .push(format!("Key '{}' is missing in {}", key, right_lang));
        }
        for key in right_map.keys().filter(|k| !left_map.contains_key(*k)) {
            report
                .errors
                .push(format!("Key '{}' is missing in {}", key, left_lang));
        }

        for (key, left_value) in &left_map {
            let Some(right_value) = right_map.get(key) else {
                continue;
            };

            let left_placeholders = Self::extract_placeholders(left_value);
            let right_placeholders = Self::extract_placeholders(right_value);
            if left_placeholders != right_placeholders {
                report.errors.push(format!(
                    "Placeholder mismatch for '{}': {} has {:?}, {} has {:?}",
                    key, left_lang, left_placeholders, right_lang, right_placeholders
                ));
            }

            if left_value.trim().is_empty() {
                report
                    .warnings
                    .push(format!("Key '{}' is empty in {}", key, left_lang));
            }
            if right_value.trim().is_empty() {
                report
                    .warnings
                    .push(format!("Key '{}' is empty in {}", key, right_lang));
            }
        }

        report
    }

    /// Extract the set of `{name}` placeholders from a value
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Placeholder Extraction Tests ====================

    #[test]
    fn test_extract_placeholders_single() {
        let found = TranslationValidator::extract_placeholders("{count} unread messages");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn test_extract_placeholders_none() {
        assert!(TranslationValidator::extract_placeholders("Home").is_empty());
    }

    #[test]
    fn test_extract_placeholders_ignores_order_and_duplicates() {
        let a = TranslationValidator::extract_placeholders("{a} {b} {a}");
        let b = TranslationValidator::extract_placeholders("{b} then {a}");
        assert_eq!(a, b);
    }

    // ==================== Table Validation Tests ====================

    #[test]
    fn test_shipped_tables_are_clean() {
        let report = TranslationValidator::validate_tables();
        assert!(report.is_clean(), "unexpected report: {:?}", report);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let tr: &[(&str, &str)] = &[("nav.home", "Ana Sayfa"), ("nav.contact", "İletişim")];
        let en: &[(&str, &str)] = &[("nav.home", "Home")];

        let report =
            TranslationValidator::validate_pair((Language::TURKISH, tr), (Language::ENGLISH, en));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("nav.contact"));
        assert!(report.errors[0].contains("en"));
    }

    #[test]
    fn test_placeholder_mismatch_is_an_error() {
        let tr: &[(&str, &str)] = &[("admin.unread", "{count} okunmamış")];
        let en: &[(&str, &str)] = &[("admin.unread", "{total} unread")];

        let report =
            TranslationValidator::validate_pair((Language::TURKISH, tr), (Language::ENGLISH, en));
        assert!(report.has_errors());
        assert!(report.errors[0].contains("Placeholder mismatch"));
    }

    #[test]
    fn test_empty_value_is_a_warning() {
        let tr: &[(&str, &str)] = &[("nav.home", "")];
        let en: &[(&str, &str)] = &[("nav.home", "Home")];

        let report =
            TranslationValidator::validate_pair((Language::TURKISH, tr), (Language::ENGLISH, en));
        assert!(!report.has_errors());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_report_default_is_clean() {
        assert!(ValidationReport::default().is_clean());
    }
}
