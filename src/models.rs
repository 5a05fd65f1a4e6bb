//! Entities exchanged with the REST API and persisted in the database.
//!
//! JSON uses camelCase names. Bilingual records keep the Turkish value in the
//! plain field and the English value in the `*_en` counterpart.

use crate::i18n::{localize, localize_list, Language, Localize};
use crate::site::icon::service_icon;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::OnceLock;

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Lowercase ASCII words joined by single hyphens ("private-pilot-license").
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap())
        .is_match(slug)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
        .is_match(email)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

// ==================== Contact Info ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapCoordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The single contact record of the site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub address_en: Option<String>,
    #[serde(default)]
    pub working_hours: Option<String>,
    #[serde(default)]
    pub working_hours_en: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub map_coordinates: MapCoordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContactInfo {
    /// Check the fields required to publish contact details.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("phone", &self.phone),
            ("email", &self.email),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} is required", name));
            }
        }
        if !is_valid_email(self.email.trim()) {
            return Err("email is invalid".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedContact {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    pub website: Option<String>,
    pub social_media: SocialMedia,
    pub map_coordinates: MapCoordinates,
}

impl Localize for ContactInfo {
    type View = LocalizedContact;

    fn localize(&self, language: Language) -> LocalizedContact {
        LocalizedContact {
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: localize(Some(self.address.as_str()), self.address_en.as_deref(), language),
            working_hours: localize(
                self.working_hours.as_deref(),
                self.working_hours_en.as_deref(),
                language,
            ),
            website: self.website.clone(),
            social_media: self.social_media.clone(),
            map_coordinates: self.map_coordinates,
        }
    }
}

// ==================== Messages ====================

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    /// Id of the service the visitor is interested in
    pub program: Option<i64>,
    pub message: String,
    pub newsletter: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/messages`. Required fields are optional here so that
/// a missing field is reported as a validation error, not a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub newsletter: Option<bool>,
}

impl NewMessage {
    /// Returns the first problem found, phrased for the `{error}` body.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if is_blank(value) {
                return Err(format!("{} is required", name));
            }
        }

        let email = self.email.as_deref().unwrap_or_default().trim();
        if !is_valid_email(email) {
            return Err("email is invalid".to_string());
        }

        Ok(())
    }
}

// ==================== Services ====================

/// A training program shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub details: Option<String>,
    pub details_en: Option<String>,
    #[sqlx(json)]
    pub benefits: Vec<String>,
    #[sqlx(json)]
    pub benefits_en: Vec<String>,
    #[sqlx(json)]
    pub process_steps: Vec<String>,
    #[sqlx(json)]
    pub process_steps_en: Vec<String>,
    pub duration: Option<String>,
    pub duration_en: Option<String>,
    pub format: Option<String>,
    pub format_en: Option<String>,
    #[sqlx(json)]
    pub features: Vec<String>,
    #[sqlx(json)]
    pub features_en: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of service create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceInput {
    pub slug: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub details: Option<String>,
    pub details_en: Option<String>,
    pub benefits: Vec<String>,
    pub benefits_en: Vec<String>,
    pub process_steps: Vec<String>,
    pub process_steps_en: Vec<String>,
    pub duration: Option<String>,
    pub duration_en: Option<String>,
    pub format: Option<String>,
    pub format_en: Option<String>,
    pub features: Vec<String>,
    pub features_en: Vec<String>,
    pub is_active: Option<bool>,
}

impl ServiceInput {
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_slug(&self.slug) {
            return Err(format!("slug '{}' is invalid", self.slug));
        }
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedService {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub details: String,
    pub benefits: Vec<String>,
    pub process_steps: Vec<String>,
    pub duration: String,
    pub format: String,
    pub features: Vec<String>,
    pub icon: &'static str,
}

impl Localize for ServiceItem {
    type View = LocalizedService;

    fn localize(&self, language: Language) -> LocalizedService {
        LocalizedService {
            slug: self.slug.clone(),
            title: localize(Some(self.title.as_str()), self.title_en.as_deref(), language),
            description: localize(
                self.description.as_deref(),
                self.description_en.as_deref(),
                language,
            ),
            details: localize(self.details.as_deref(), self.details_en.as_deref(), language),
            benefits: localize_list(&self.benefits, &self.benefits_en, language),
            process_steps: localize_list(&self.process_steps, &self.process_steps_en, language),
            duration: localize(self.duration.as_deref(), self.duration_en.as_deref(), language),
            format: localize(self.format.as_deref(), self.format_en.as_deref(), language),
            features: localize_list(&self.features, &self.features_en, language),
            icon: service_icon(&self.slug),
        }
    }
}

// ==================== Announcements ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub content: Option<String>,
    pub content_en: Option<String>,
    pub category: Option<String>,
    pub category_en: Option<String>,
    pub author: String,
    pub date: DateTime<Utc>,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnouncementInput {
    pub slug: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub content: Option<String>,
    pub content_en: Option<String>,
    pub category: Option<String>,
    pub category_en: Option<String>,
    pub author: String,
    /// Publication date; the server uses the current time when omitted
    pub date: Option<DateTime<Utc>>,
    pub images: Vec<String>,
}

impl AnnouncementInput {
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_slug(&self.slug) {
            return Err(format!("slug '{}' is invalid", self.slug));
        }
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedAnnouncement {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub images: Vec<String>,
}

impl Localize for Announcement {
    type View = LocalizedAnnouncement;

    fn localize(&self, language: Language) -> LocalizedAnnouncement {
        LocalizedAnnouncement {
            slug: self.slug.clone(),
            title: localize(Some(self.title.as_str()), self.title_en.as_deref(), language),
            description: localize(
                self.description.as_deref(),
                self.description_en.as_deref(),
                language,
            ),
            content: localize(self.content.as_deref(), self.content_en.as_deref(), language),
            category: localize(self.category.as_deref(), self.category_en.as_deref(), language),
            author: self.author.clone(),
            date: self.date,
            images: self.images.clone(),
        }
    }
}

// ==================== Query Parameters ====================

/// `GET /api/services?limit=&isActive=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `GET /api/messages?isRead=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

/// `GET /api/announcements?limit=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

// ==================== Users ====================

/// An admin or consultant account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub title: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_service() -> ServiceItem {
        let now = Utc::now();
        ServiceItem {
            id: 1,
            slug: "private-pilot-license".to_string(),
            title: "Özel Pilot Lisansı".to_string(),
            title_en: Some("Private Pilot License".to_string()),
            description: Some("".to_string()),
            description_en: Some("Learn to fly".to_string()),
            details: None,
            details_en: None,
            benefits: vec!["Lisans".to_string()],
            benefits_en: vec![],
            process_steps: vec![],
            process_steps_en: vec!["Ground school".to_string()],
            duration: Some("6 ay".to_string()),
            duration_en: Some("6 months".to_string()),
            format: None,
            format_en: None,
            features: vec![],
            features_en: vec![],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("ppl"));
        assert!(is_valid_slug("private-pilot-license"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Private"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("çağrı"));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("pilot@example.com"));
        assert!(!is_valid_email("pilot@example"));
        assert!(!is_valid_email("pilot example.com"));
    }

    #[test]
    fn test_new_message_requires_email() {
        let message = NewMessage {
            first_name: Some("Ayşe".to_string()),
            last_name: Some("Yılmaz".to_string()),
            message: Some("Merhaba".to_string()),
            ..Default::default()
        };
        assert_eq!(message.validate().unwrap_err(), "email is required");
    }

    #[test]
    fn test_new_message_rejects_blank_name() {
        let message = NewMessage {
            first_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(message.validate().unwrap_err(), "firstName is required");
    }

    #[test]
    fn test_new_message_valid() {
        let message = NewMessage {
            first_name: Some("Ayşe".to_string()),
            last_name: Some("Yılmaz".to_string()),
            email: Some("ayse@example.com".to_string()),
            message: Some("Merhaba".to_string()),
            ..Default::default()
        };
        assert!(message.validate().is_ok());
    }

    #[test]
    fn test_contact_validation() {
        let mut contact = ContactInfo {
            phone: "+90 212 000 00 00".to_string(),
            email: "info@example.com".to_string(),
            address: "İstanbul".to_string(),
            ..Default::default()
        };
        assert!(contact.validate().is_ok());

        contact.address.clear();
        assert_eq!(contact.validate().unwrap_err(), "address is required");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_new_message_deserializes_camel_case() {
        let json = r#"{"firstName":"Ali","lastName":"Kaya","email":"ali@example.com","message":"Hi","program":3}"#;
        let message: NewMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.first_name.as_deref(), Some("Ali"));
        assert_eq!(message.program, Some(3));
        assert_eq!(message.newsletter, None);
    }

    #[test]
    fn test_user_never_serializes_password_hash() {
        let user = User {
            id: 1,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "salt$hash".to_string(),
            name: "Admin".to_string(),
            title: None,
            is_admin: true,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isAdmin"], true);
    }

    #[test]
    fn test_contact_deserializes_with_missing_optionals() {
        let json = r#"{"phone":"1","email":"a@b.co","address":"x","mapCoordinates":{"lat":41.0,"lng":29.0}}"#;
        let contact: ContactInfo = serde_json::from_str(json).unwrap();
        assert_eq!(contact.map_coordinates.lat, 41.0);
        assert_eq!(contact.social_media, SocialMedia::default());
    }

    // ==================== Localization Tests ====================

    #[test]
    fn test_service_localization_turkish() {
        let view = sample_service().localize(Language::TURKISH);
        assert_eq!(view.title, "Özel Pilot Lisansı");
        // Empty Turkish description falls back to English
        assert_eq!(view.description, "Learn to fly");
        assert_eq!(view.details, "");
        assert_eq!(view.benefits, vec!["Lisans"]);
        assert_eq!(view.process_steps, vec!["Ground school"]);
        assert_eq!(view.duration, "6 ay");
    }

    #[test]
    fn test_service_localization_english() {
        let view = sample_service().localize(Language::ENGLISH);
        assert_eq!(view.title, "Private Pilot License");
        assert_eq!(view.benefits, vec!["Lisans"]);
        assert_eq!(view.duration, "6 months");
        assert_eq!(view.icon, service_icon("private-pilot-license"));
    }

    #[test]
    fn test_contact_localization() {
        let contact = ContactInfo {
            address: "Atatürk Havalimanı".to_string(),
            address_en: Some("Ataturk Airport".to_string()),
            working_hours: Some("09:00-18:00".to_string()),
            ..Default::default()
        };
        assert_eq!(contact.localize(Language::ENGLISH).address, "Ataturk Airport");
        assert_eq!(contact.localize(Language::ENGLISH).working_hours, "09:00-18:00");
        assert_eq!(contact.localize(Language::TURKISH).address, "Atatürk Havalimanı");
    }
}
