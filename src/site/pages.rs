//! Page composers for the public site.
//!
//! Each page owns its fetched records in raw bilingual form and produces a
//! localized view on demand, so switching language re-renders from the same
//! data without a refetch.

use crate::client::{fetch_primary, fetch_secondary, ApiClient, ErrorKind, FetchError};
use crate::i18n::{Language, Localize};
use crate::models::{
    is_valid_email, Announcement, ContactInfo, LocalizedAnnouncement, LocalizedContact,
    LocalizedService, Message, NewMessage, ServiceItem, ServiceQuery,
};
use crate::site::context::LanguageContext;
use crate::site::icon::Carousel;
use crate::site::page::{ErrorNotice, Liveness, LoadState, Page};
use tracing::{info, warn};

pub const HOME_SERVICE_LIMIT: i64 = 6;
pub const HOME_ANNOUNCEMENT_LIMIT: i64 = 5;
const CAROUSEL_WINDOW: usize = 3;

// ==================== Home ====================

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub services: LoadState<Vec<LocalizedService>>,
    pub contact: LocalizedContact,
    pub announcements: Vec<LocalizedAnnouncement>,
}

/// Landing page: featured services (blocking), social links and the
/// announcements carousel (both non-blocking).
#[derive(Debug)]
pub struct HomePage {
    liveness: Liveness,
    services: Page<Vec<ServiceItem>>,
    contact: ContactInfo,
    announcements: Carousel<Announcement>,
}

impl HomePage {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            services: Page::new(liveness.clone()),
            liveness,
            contact: ContactInfo::default(),
            announcements: Carousel::default(),
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        let query = ServiceQuery {
            limit: Some(HOME_SERVICE_LIMIT),
            is_active: Some(true),
        };

        let services = &mut self.services;
        let (_, contact, announcements) = futures::join!(
            services.load(fetch_primary("home services", client.list_services(&query))),
            fetch_secondary("contact info", client.get_contact()),
            fetch_secondary(
                "home announcements",
                client.list_announcements(Some(HOME_ANNOUNCEMENT_LIMIT))
            ),
        );

        if !self.liveness.is_mounted() {
            return;
        }
        self.contact = contact;
        self.announcements = Carousel::new(announcements);
    }

    pub fn services(&self) -> &LoadState<Vec<ServiceItem>> {
        self.services.state()
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn carousel(&mut self) -> &mut Carousel<Announcement> {
        &mut self.announcements
    }

    pub fn render(&self, language: Language) -> HomeView {
        HomeView {
            services: self.services.render(language),
            contact: self.contact.localize(language),
            announcements: self
                .announcements
                .visible(CAROUSEL_WINDOW)
                .into_iter()
                .map(|announcement| announcement.localize(language))
                .collect(),
        }
    }
}

// ==================== Service List ====================

/// All active programs. An empty list is an empty state, not an error.
#[derive(Debug)]
pub struct ServicesPage {
    page: Page<Vec<ServiceItem>>,
}

impl ServicesPage {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            page: Page::new(liveness),
        }
    }

    pub async fn load(&mut self, client: &ApiClient) {
        let query = ServiceQuery {
            limit: None,
            is_active: Some(true),
        };
        self.page
            .load(fetch_primary("service list", client.list_services(&query)))
            .await;
    }

    pub fn state(&self) -> &LoadState<Vec<ServiceItem>> {
        self.page.state()
    }

    pub fn render(&self, language: Language) -> LoadState<Vec<LocalizedService>> {
        self.page.render(language)
    }
}

// ==================== Detail Pages ====================

/// A page keyed by a slug route parameter. Navigating to a different slug
/// reloads; navigating to the same one does not.
#[derive(Debug)]
pub struct DetailPage<T> {
    slug: Option<String>,
    page: Page<T>,
}

pub type ServiceDetailPage = DetailPage<ServiceItem>;
pub type AnnouncementDetailPage = DetailPage<Announcement>;

impl<T> DetailPage<T> {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            slug: None,
            page: Page::new(liveness),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn state(&self) -> &LoadState<T> {
        self.page.state()
    }

    fn begin(&mut self, slug: &str) -> bool {
        let unchanged = self.slug.as_deref() == Some(slug);
        if unchanged && !matches!(self.page.state(), LoadState::Idle) {
            return false;
        }
        self.slug = Some(slug.to_string());
        true
    }
}

impl<T: Localize> DetailPage<T> {
    pub fn render(&self, language: Language) -> LoadState<T::View> {
        self.page.render(language)
    }
}

impl DetailPage<ServiceItem> {
    /// Returns whether a fetch was issued.
    pub async fn navigate(&mut self, client: &ApiClient, slug: &str) -> bool {
        if !self.begin(slug) {
            return false;
        }
        self.page
            .load(fetch_primary("service detail", client.get_service(slug)))
            .await;
        true
    }
}

impl DetailPage<Announcement> {
    /// Returns whether a fetch was issued.
    pub async fn navigate(&mut self, client: &ApiClient, slug: &str) -> bool {
        if !self.begin(slug) {
            return false;
        }
        self.page
            .load(fetch_primary("announcement detail", client.get_announcement(slug)))
            .await;
        true
    }
}

// ==================== Contact ====================

/// Contact details plus the contact form.
#[derive(Debug)]
pub struct ContactPage {
    contact: Page<ContactInfo>,
    pub form: ContactForm,
}

impl ContactPage {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            contact: Page::new(liveness),
            form: ContactForm::default(),
        }
    }

    /// Details not configured yet render as empty, the form stays usable.
    pub async fn load(&mut self, client: &ApiClient) {
        let fetch = async {
            match client.get_contact().await {
                Err(err) if err.is_not_found() => Ok(ContactInfo::default()),
                other => other,
            }
        };
        self.contact.load(fetch_primary("contact page", fetch)).await;
    }

    pub fn state(&self) -> &LoadState<ContactInfo> {
        self.contact.state()
    }

    pub fn render(&self, language: Language) -> LoadState<LocalizedContact> {
        self.contact.render(language)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    Email,
}

/// Inline validation message attached to one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as sent to the API (`firstName`, `email`, ...)
    pub field: &'static str,
    pub label_key: &'static str,
    pub rule: FieldRule,
}

impl FieldError {
    pub fn message(&self, context: &LanguageContext) -> String {
        match self.rule {
            FieldRule::Required => {
                context.t_with("validation.required", &[("field", context.t(self.label_key))])
            }
            FieldRule::Email => context.t("validation.email").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub program: Option<i64>,
    pub message: String,
    pub newsletter: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitState {
    #[default]
    Editing,
    Sent(Message),
    /// 400 from the server, attached to a field when one can be identified
    Rejected {
        field: Option<&'static str>,
        message: String,
    },
    Failed(ErrorNotice),
}

const REQUIRED_FIELDS: &[(&str, &str)] = &[
    ("firstName", "form.first_name"),
    ("lastName", "form.last_name"),
    ("email", "form.email"),
    ("message", "form.message"),
];

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: ContactFormFields,
    errors: Vec<FieldError>,
    status: SubmitState,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ContactForm {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn status(&self) -> &SubmitState {
        &self.status
    }

    fn value(&self, field: &str) -> &str {
        match field {
            "firstName" => &self.fields.first_name,
            "lastName" => &self.fields.last_name,
            "email" => &self.fields.email,
            "message" => &self.fields.message,
            _ => "",
        }
    }

    /// Client-side checks run before any request is made.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = REQUIRED_FIELDS
            .iter()
            .filter(|(field, _)| self.value(field).trim().is_empty())
            .map(|&(field, label_key)| FieldError {
                field,
                label_key,
                rule: FieldRule::Required,
            })
            .collect();

        let email = self.fields.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.push(FieldError {
                field: "email",
                label_key: "form.email",
                rule: FieldRule::Email,
            });
        }
        errors
    }

    pub fn payload(&self) -> NewMessage {
        NewMessage {
            first_name: optional(&self.fields.first_name),
            last_name: optional(&self.fields.last_name),
            email: optional(&self.fields.email),
            phone: optional(&self.fields.phone),
            subject: optional(&self.fields.subject),
            program: self.fields.program,
            message: optional(&self.fields.message),
            newsletter: Some(self.fields.newsletter),
        }
    }

    /// Validate and submit. Returns true when the message was stored; the
    /// fields are cleared in that case.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            self.status = SubmitState::Editing;
            return false;
        }

        match client.submit_message(&self.payload()).await {
            Ok(message) => {
                info!("Contact message {} submitted", message.id);
                self.fields = ContactFormFields::default();
                self.status = SubmitState::Sent(message);
                true
            }
            Err(err) => {
                self.status = Self::failure_state(&err);
                false
            }
        }
    }

    fn failure_state(err: &FetchError) -> SubmitState {
        if err.kind() == ErrorKind::Validation {
            let field = REQUIRED_FIELDS
                .iter()
                .map(|(field, _)| *field)
                .chain(["program"])
                .find(|field| err.message.starts_with(field));
            return SubmitState::Rejected {
                field,
                message: err.message.clone(),
            };
        }

        warn!("Contact form submission failed: {}", err);
        SubmitState::Failed(ErrorNotice::from_error(err))
    }
}
