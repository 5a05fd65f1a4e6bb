//! The active display language, shared by every mounted page.
//!
//! `LanguageContext` is constructed explicitly and cloned into consumers;
//! clones share the same state. Pages read it at render time, so a switch is
//! visible everywhere on the next render without refetching anything.

use crate::client::SharedStorage;
use crate::i18n::{Language, TranslationTable};
use anyhow::Result;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Storage key of the persisted preference
pub const LANGUAGE_KEY: &str = "language";

#[derive(Clone)]
pub struct LanguageContext {
    current: Arc<RwLock<Language>>,
    storage: SharedStorage,
}

impl LanguageContext {
    /// Restore the persisted preference, or use the default language.
    pub fn load(storage: SharedStorage) -> Self {
        let language = match storage.get(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
                debug!("Ignoring stored language preference: {}", e);
                Language::default_language()
            }),
            None => Language::default_language(),
        };

        Self {
            current: Arc::new(RwLock::new(language)),
            storage,
        }
    }

    pub fn language(&self) -> Language {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Switch language and persist the choice.
    pub fn set_language(&self, language: Language) -> Result<()> {
        {
            let mut current = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *current = language;
        }
        self.storage.set(LANGUAGE_KEY, language.code())?;
        info!("Display language set to {}", language);
        Ok(())
    }

    /// Switch tr↔en, returning the new language.
    pub fn toggle(&self) -> Result<Language> {
        let next = self.language().counterpart();
        self.set_language(next)?;
        Ok(next)
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        TranslationTable::get().resolve(key, self.language())
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        TranslationTable::get().resolve_with(key, self.language(), args)
    }
}
