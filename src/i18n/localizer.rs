//! Field-level localizer for bilingual records.
//!
//! Content records store one field per language (`title` / `title_en`). The
//! active language picks its own field first and falls back to the
//! counterpart when that field is absent or empty. An empty string never
//! wins over a non-empty counterpart.

use crate::i18n::{Language, LocalizationMetrics};

/// Resolve a bilingual scalar field to its display string.
///
/// Returns `""` when both sides are absent or empty.
pub fn localize(tr: Option<&str>, en: Option<&str>, language: Language) -> String {
    let (primary, fallback) = if language == Language::TURKISH {
        (tr, en)
    } else {
        (en, tr)
    };

    match (non_empty(primary), non_empty(fallback)) {
        (Some(value), _) => value.to_string(),
        (None, Some(value)) => {
            LocalizationMetrics::global().record_field_fallback();
            value.to_string()
        }
        (None, None) => {
            LocalizationMetrics::global().record_empty_field();
            String::new()
        }
    }
}

/// Resolve a bilingual sequence field. An empty sequence counts as absent.
pub fn localize_list(tr: &[String], en: &[String], language: Language) -> Vec<String> {
    let (primary, fallback) = if language == Language::TURKISH {
        (tr, en)
    } else {
        (en, tr)
    };

    if !primary.is_empty() {
        primary.to_vec()
    } else if !fallback.is_empty() {
        LocalizationMetrics::global().record_field_fallback();
        fallback.to_vec()
    } else {
        Vec::new()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A record that can be flattened into single-language display values.
pub trait Localize {
    type View;

    fn localize(&self, language: Language) -> Self::View;
}

impl<T: Localize> Localize for Vec<T> {
    type View = Vec<T::View>;

    fn localize(&self, language: Language) -> Self::View {
        self.iter().map(|item| item.localize(language)).collect()
    }
}

impl<T: Localize> Localize for Option<T> {
    type View = Option<T::View>;

    fn localize(&self, language: Language) -> Self::View {
        self.as_ref().map(|item| item.localize(language))
    }
}
