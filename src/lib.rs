//! Bilingual (Turkish/English) aviation-training site.
//!
//! - `api`: REST API over the content database
//! - `client`: content fetchers consuming that API
//! - `site`: language context and page composition for the public site
//! - `admin`: auth guard and admin CRUD surfaces
//! - `i18n`: translation table and field-level localizer

pub mod admin;
pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod i18n;
pub mod models;
pub mod security;
pub mod site;
