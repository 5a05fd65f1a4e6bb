//! Translation table for the UI chrome: navigation, labels, form captions,
//! notices. Content records carry their own bilingual fields and go through
//! the field-level localizer instead.

use crate::i18n::{Language, LanguageRegistry, LocalizationMetrics};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

// ==================== Turkish Entries ====================

pub const TURKISH_ENTRIES: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Ana Sayfa"),
    ("nav.about", "Hakkımızda"),
    ("nav.services", "Eğitimlerimiz"),
    ("nav.announcements", "Duyurular"),
    ("nav.contact", "İletişim"),
    ("nav.admin", "Yönetim"),
    // Home
    ("home.hero_title", "Geleceğin pilotlarını yetiştiriyoruz"),
    ("home.hero_subtitle", "Uluslararası standartlarda havacılık eğitimi"),
    ("home.featured_services", "Öne Çıkan Eğitimler"),
    ("home.latest_announcements", "Son Duyurular"),
    // Services
    ("services.title", "Eğitim Programlarımız"),
    ("services.duration", "Süre"),
    ("services.format", "Eğitim Şekli"),
    ("services.benefits", "Kazanımlar"),
    ("services.process", "Eğitim Süreci"),
    ("services.features", "Öne Çıkan Özellikler"),
    ("services.empty", "Şu anda listelenecek eğitim bulunmuyor."),
    // Announcements
    ("announcements.title", "Duyurular"),
    ("announcements.by_author", "Yazar: {author}"),
    ("announcements.empty", "Henüz duyuru yayınlanmadı."),
    // Contact
    ("contact.title", "Bize Ulaşın"),
    ("contact.phone", "Telefon"),
    ("contact.email", "E-posta"),
    ("contact.address", "Adres"),
    ("contact.working_hours", "Çalışma Saatleri"),
    ("contact.follow_us", "Bizi Takip Edin"),
    // Contact form
    ("form.first_name", "Ad"),
    ("form.last_name", "Soyad"),
    ("form.email", "E-posta"),
    ("form.phone", "Telefon"),
    ("form.subject", "Konu"),
    ("form.program", "İlgilendiğiniz Program"),
    ("form.message", "Mesajınız"),
    ("form.newsletter", "Bültenimize abone olmak istiyorum"),
    ("form.submit", "Gönder"),
    ("form.success", "Mesajınız alındı, en kısa sürede size dönüş yapacağız."),
    // Validation
    ("validation.required", "{field} alanı zorunludur"),
    ("validation.email", "Geçerli bir e-posta adresi giriniz"),
    // Errors
    ("errors.generic", "Bir hata oluştu, lütfen daha sonra tekrar deneyin."),
    ("errors.not_found", "Aradığınız sayfa bulunamadı."),
    ("errors.unauthorized", "Bu sayfayı görüntülemek için giriş yapmalısınız."),
    // Common
    ("common.loading", "Yükleniyor..."),
    ("common.language_switch", "English"),
    // Admin
    ("admin.login.title", "Yönetici Girişi"),
    ("admin.messages.title", "Gelen Mesajlar"),
    ("admin.messages.unread", "{count} okunmamış mesaj"),
    ("admin.messages.mark_read", "Okundu olarak işaretle"),
    ("admin.messages.delete", "Sil"),
    ("admin.messages.empty", "Gösterilecek mesaj yok."),
    ("admin.logout", "Çıkış Yap"),
    // Footer
    ("footer.rights", "© {year} Tüm hakları saklıdır."),
];

// ==================== English Entries ====================

pub const ENGLISH_ENTRIES: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Home"),
    ("nav.about", "About Us"),
    ("nav.services", "Our Training"),
    ("nav.announcements", "Announcements"),
    ("nav.contact", "Contact"),
    ("nav.admin", "Admin"),
    // Home
    ("home.hero_title", "Training the pilots of tomorrow"),
    ("home.hero_subtitle", "Aviation training to international standards"),
    ("home.featured_services", "Featured Programs"),
    ("home.latest_announcements", "Latest Announcements"),
    // Services
    ("services.title", "Our Training Programs"),
    ("services.duration", "Duration"),
    ("services.format", "Format"),
    ("services.benefits", "What You Gain"),
    ("services.process", "Training Process"),
    ("services.features", "Highlights"),
    ("services.empty", "There are no programs to show right now."),
    // Announcements
    ("announcements.title", "Announcements"),
    ("announcements.by_author", "By {author}"),
    ("announcements.empty", "No announcements have been published yet."),
    // Contact
    ("contact.title", "Get in Touch"),
    ("contact.phone", "Phone"),
    ("contact.email", "Email"),
    ("contact.address", "Address"),
    ("contact.working_hours", "Working Hours"),
    ("contact.follow_us", "Follow Us"),
    // Contact form
    ("form.first_name", "First Name"),
    ("form.last_name", "Last Name"),
    ("form.email", "Email"),
    ("form.phone", "Phone"),
    ("form.subject", "Subject"),
    ("form.program", "Program of Interest"),
    ("form.message", "Your Message"),
    ("form.newsletter", "Subscribe me to the newsletter"),
    ("form.submit", "Send"),
    ("form.success", "We received your message and will get back to you shortly."),
    // Validation
    ("validation.required", "{field} is required"),
    ("validation.email", "Please enter a valid email address"),
    // Errors
    ("errors.generic", "Something went wrong, please try again later."),
    ("errors.not_found", "The page you are looking for could not be found."),
    ("errors.unauthorized", "You need to sign in to view this page."),
    // Common
    ("common.loading", "Loading..."),
    ("common.language_switch", "Türkçe"),
    // Admin
    ("admin.login.title", "Admin Sign In"),
    ("admin.messages.title", "Inbox"),
    ("admin.messages.unread", "{count} unread messages"),
    ("admin.messages.mark_read", "Mark as read"),
    ("admin.messages.delete", "Delete"),
    ("admin.messages.empty", "No messages to show."),
    ("admin.logout", "Sign Out"),
    // Footer
    ("footer.rights", "© {year} All rights reserved."),
];

/// Static, immutable (language, key) → display string lookup.
pub struct TranslationTable {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

static TABLE: OnceLock<TranslationTable> = OnceLock::new();

impl TranslationTable {
    /// Get the process-wide table, built from the registry on first use.
    pub fn get() -> &'static TranslationTable {
        TABLE.get_or_init(|| {
            let tables = LanguageRegistry::get()
                .list_enabled()
                .into_iter()
                .map(|config| (config.code, config.entries.iter().copied().collect()))
                .collect();
            TranslationTable { tables }
        })
    }

    /// Resolve `key` in `language`, returning the key itself when no entry exists.
    ///
    /// A missing translation shows up verbatim in the UI instead of failing
    /// the page.
    pub fn resolve<'a>(&self, key: &'a str, language: Language) -> &'a str {
        match self
            .tables
            .get(language.code())
            .and_then(|table| table.get(key))
        {
            Some(value) => {
                LocalizationMetrics::global().record_table_hit();
                *value
            }
            None => {
                LocalizationMetrics::global().record_table_miss();
                debug!("Missing translation for '{}' in {}", key, language);
                key
            }
        }
    }

    /// Resolve `key` and substitute `{name}` placeholders in one pass over the
    /// template. Substituted values are never rescanned; unknown placeholders
    /// stay as written.
    pub fn resolve_with(&self, key: &str, language: Language, args: &[(&str, &str)]) -> String {
        let template = self.resolve(key, language);
        let mut text = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };
            let name = &after[..close];
            match args.iter().find(|(arg, _)| *arg == name) {
                Some((_, value)) => text.push_str(value),
                None => text.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }
        text.push_str(rest);
        text
    }

    /// All keys defined for `language`, sorted.
    pub fn keys(&self, language: Language) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .tables
            .get(language.code())
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}
