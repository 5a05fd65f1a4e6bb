//! Internationalization (i18n) for the bilingual site.
//!
//! # Architecture
//!
//! - `registry`: the two supported languages and their metadata
//! - `language`: validated `Language` value type
//! - `strings`: static translation table for UI chrome, with key fallback
//! - `localizer`: field-level resolution for bilingual content records
//! - `validator`: consistency checks between the Turkish and English tables
//! - `metrics`: counters for table misses and field fallbacks
//!
//! # Example
//!
//! ```rust,ignore
//! use aviation_site::i18n::{localize, Language, TranslationTable};
//!
//! let label = TranslationTable::get().resolve("nav.home", Language::ENGLISH);
//! let title = localize(Some("Başlık"), None, Language::ENGLISH); // "Başlık"
//! ```

mod language;
mod localizer;
mod metrics;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use localizer::{localize, localize_list, Localize};
pub use metrics::{LocalizationMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{TranslationTable, ENGLISH_ENTRIES, TURKISH_ENTRIES};
pub use validator::{TranslationValidator, ValidationReport};
