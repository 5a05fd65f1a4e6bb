//! Language registry: Single source of truth for all supported languages.
//!
//! The site is bilingual. Turkish is the default language shown to first-time
//! visitors; English is the counterpart. The registry is initialised once
//! with `OnceLock` and never changes afterwards.

use crate::i18n::strings::{ENGLISH_ENTRIES, TURKISH_ENTRIES};
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code ("tr", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Turkish")
    pub name: &'static str,

    /// Native name of the language (e.g., "Türkçe")
    pub native_name: &'static str,

    /// Whether this is the default language for visitors without a stored preference
    pub is_default: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    /// Flat (key, display string) entries of the translation table
    pub entries: &'static [(&'static str, &'static str)],
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if the registry defines zero or several default languages,
    /// which is a programming error in `default_languages`.
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "tr",
            name: "Turkish",
            native_name: "Türkçe",
            is_default: true,
            enabled: true,
            entries: TURKISH_ENTRIES,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
            enabled: true,
            entries: ENGLISH_ENTRIES,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_turkish() {
        let config = LanguageRegistry::get()
            .get_by_code("tr")
            .expect("tr should be registered");
        assert_eq!(config.name, "Turkish");
        assert_eq!(config.native_name, "Türkçe");
        assert!(config.is_default);
        assert!(!config.entries.is_empty());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("de").is_none());
    }

    #[test]
    fn test_list_enabled_contains_both_languages() {
        let enabled = LanguageRegistry::get().list_enabled();
        assert_eq!(enabled.len(), 2);
        assert!(enabled.iter().any(|lang| lang.code == "tr"));
        assert!(enabled.iter().any(|lang| lang.code == "en"));
    }

    #[test]
    fn test_default_language_is_turkish() {
        assert_eq!(LanguageRegistry::get().default_language().code, "tr");
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("tr"));
        assert!(registry.is_enabled("en"));
        assert!(!registry.is_enabled("fr"));
    }
}
