//! Public-site composition: language context, page loading state machine,
//! concrete pages and routing.

pub mod context;
pub mod icon;
pub mod page;
pub mod pages;
pub mod routes;

pub use context::LanguageContext;
pub use icon::{pick, service_icon, Carousel};
pub use page::{ErrorNotice, Liveness, LoadState, Page};
pub use pages::{
    AnnouncementDetailPage, ContactForm, ContactPage, FieldError, HomePage, ServiceDetailPage,
    ServicesPage, SubmitState,
};
pub use routes::Route;
