//! Localization metrics.
//!
//! Counts translation-table lookups and field-level fallbacks so that
//! untranslated content shows up in logs and reports, not only on screen.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Localization counters.
pub struct LocalizationMetrics {
    /// Keys found in the translation table
    table_hits: AtomicUsize,

    /// Keys missing from the translation table (rendered verbatim)
    table_misses: AtomicUsize,

    /// Bilingual fields resolved from the counterpart language
    field_fallbacks: AtomicUsize,

    /// Bilingual fields empty in both languages
    empty_fields: AtomicUsize,
}

static METRICS: OnceLock<LocalizationMetrics> = OnceLock::new();

impl LocalizationMetrics {
    /// A fresh set of counters, all at zero.
    pub fn new() -> Self {
        Self {
            table_hits: AtomicUsize::new(0),
            table_misses: AtomicUsize::new(0),
            field_fallbacks: AtomicUsize::new(0),
            empty_fields: AtomicUsize::new(0),
        }
    }

    /// Process-wide counters fed by the translation table and the localizer.
    pub fn global() -> &'static LocalizationMetrics {
        METRICS.get_or_init(LocalizationMetrics::new)
    }

    pub fn record_table_hit(&self) {
        self.table_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_table_miss(&self) {
        self.table_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_field_fallback(&self) {
        self.field_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_field(&self) {
        self.empty_fields.fetch_add(1, Ordering::Relaxed);
    }

    pub fn table_hits(&self) -> usize {
        self.table_hits.load(Ordering::Relaxed)
    }

    pub fn table_misses(&self) -> usize {
        self.table_misses.load(Ordering::Relaxed)
    }

    pub fn field_fallbacks(&self) -> usize {
        self.field_fallbacks.load(Ordering::Relaxed)
    }

    pub fn empty_fields(&self) -> usize {
        self.empty_fields.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.table_hits();
        let misses = self.table_misses();
        let lookups = hits + misses;
        let table_coverage = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            table_hits: hits,
            table_misses: misses,
            table_coverage,
            field_fallbacks: self.field_fallbacks(),
            empty_fields: self.empty_fields(),
        }
    }
}

impl Default for LocalizationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the localization counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub table_hits: usize,
    pub table_misses: usize,

    /// Share of table lookups that found an entry, as a percentage (0-100)
    pub table_coverage: f64,

    pub field_fallbacks: usize,
    pub empty_fields: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{localize, Language, TranslationTable};
    use serial_test::serial;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LocalizationMetrics::new();
        assert_eq!(metrics.table_hits(), 0);
        assert_eq!(metrics.table_misses(), 0);
        assert_eq!(metrics.field_fallbacks(), 0);
        assert_eq!(metrics.empty_fields(), 0);
    }

    #[test]
    fn test_record_counters() {
        let metrics = LocalizationMetrics::new();
        metrics.record_table_hit();
        metrics.record_table_miss();
        metrics.record_table_miss();
        metrics.record_field_fallback();
        metrics.record_empty_field();

        assert_eq!(metrics.table_hits(), 1);
        assert_eq!(metrics.table_misses(), 2);
        assert_eq!(metrics.field_fallbacks(), 1);
        assert_eq!(metrics.empty_fields(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LocalizationMetrics::new().report();
        assert_eq!(report.table_hits, 0);
        assert_eq!(report.table_coverage, 0.0);
        assert_eq!(report.field_fallbacks, 0);
    }

    #[test]
    fn test_report_coverage() {
        let metrics = LocalizationMetrics::new();

        // 3 hits, 1 miss = 75% coverage
        metrics.record_table_hit();
        metrics.record_table_hit();
        metrics.record_table_hit();
        metrics.record_table_miss();

        assert_eq!(metrics.report().table_coverage, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(LocalizationMetrics::new().report()).unwrap();
        assert_eq!(json["table_hits"], 0);
        assert!(json.get("field_fallbacks").is_some());
    }

    // ==================== Global Wiring Tests ====================

    #[test]
    #[serial]
    fn test_table_miss_feeds_global_metrics() {
        let metrics = LocalizationMetrics::global();
        let before = metrics.table_misses();

        TranslationTable::get().resolve("nav.nope", Language::ENGLISH);

        assert!(metrics.table_misses() > before);
    }

    #[test]
    #[serial]
    fn test_field_fallback_feeds_global_metrics() {
        let metrics = LocalizationMetrics::global();
        let fallbacks = metrics.field_fallbacks();
        let empties = metrics.empty_fields();

        localize(None, Some("English"), Language::TURKISH);
        localize(Some(""), None, Language::ENGLISH);

        assert!(metrics.field_fallbacks() > fallbacks);
        assert!(metrics.empty_fields() > empties);
    }
}
