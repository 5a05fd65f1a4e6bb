//! Seed binary - creates the admin account and, optionally, sample content
//!
//! Usage:
//!   cargo run --bin seed                   # Create the admin user if missing
//!   cargo run --bin seed -- --with-content # Also add sample contact info, services and an announcement
//!
//! Required environment variables:
//! - SEED_ADMIN_PASSWORD
//!
//! Optional:
//! - DATABASE_URL (defaults to sqlite://data/site.db?mode=rwc)
//! - SEED_ADMIN_USERNAME (defaults to admin)

use anyhow::Result;
use aviation_site::config::Config;
use aviation_site::db::{Database, NewUser};
use aviation_site::models::{AnnouncementInput, ContactInfo, MapCoordinates, ServiceInput};
use aviation_site::security::hash_password;
use tracing::info;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_services() -> Vec<ServiceInput> {
    vec![
        ServiceInput {
            slug: "private-pilot-license".to_string(),
            title: "Özel Pilot Lisansı (PPL)".to_string(),
            title_en: Some("Private Pilot License (PPL)".to_string()),
            description: Some("Havacılık kariyerinizin ilk adımı".to_string()),
            description_en: Some("The first step of your aviation career".to_string()),
            benefits: strings(&["Tek motorlu uçak kullanma yetkisi", "Uluslararası geçerlilik"]),
            benefits_en: strings(&["Single-engine aircraft privileges", "International validity"]),
            process_steps: strings(&["Teorik eğitim", "Uçuş eğitimi", "Sınav"]),
            process_steps_en: strings(&["Ground school", "Flight training", "Checkride"]),
            duration: Some("6 ay".to_string()),
            duration_en: Some("6 months".to_string()),
            format: Some("Yüz yüze".to_string()),
            format_en: Some("In person".to_string()),
            is_active: Some(true),
            ..Default::default()
        },
        ServiceInput {
            slug: "commercial-pilot-license".to_string(),
            title: "Ticari Pilot Lisansı (CPL)".to_string(),
            title_en: Some("Commercial Pilot License (CPL)".to_string()),
            description: Some("Profesyonel pilotluğa giden yol".to_string()),
            duration: Some("12 ay".to_string()),
            duration_en: Some("12 months".to_string()),
            is_active: Some(true),
            ..Default::default()
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seed=info".parse()?)
                .add_directive("aviation_site=info".parse()?),
        )
        .init();

    let with_content = std::env::args().any(|arg| arg == "--with-content");
    let config = Config::from_env()?;
    let db = Database::connect(&config.database_url).await?;

    if db
        .get_user_by_username(&config.seed_admin_username)
        .await?
        .is_some()
    {
        info!("Admin '{}' already exists", config.seed_admin_username);
    } else {
        let password_hash = hash_password(config.require_seed_password()?)?;
        db.create_user(&NewUser {
            username: &config.seed_admin_username,
            email: "admin@localhost",
            password_hash: &password_hash,
            name: "Administrator",
            title: None,
            is_admin: true,
        })
        .await?;
        info!("Created admin '{}'", config.seed_admin_username);
    }

    if !with_content {
        return Ok(());
    }

    if db.get_contact().await?.is_none() {
        db.upsert_contact(&ContactInfo {
            phone: "+90 212 000 00 00".to_string(),
            email: "info@example.com".to_string(),
            address: "Atatürk Havalimanı Genel Havacılık Terminali, İstanbul".to_string(),
            address_en: Some("Ataturk Airport General Aviation Terminal, Istanbul".to_string()),
            working_hours: Some("Hafta içi 09:00-18:00".to_string()),
            working_hours_en: Some("Weekdays 09:00-18:00".to_string()),
            map_coordinates: MapCoordinates {
                lat: 40.9769,
                lng: 28.8146,
            },
            ..Default::default()
        })
        .await?;
        info!("Created sample contact info");
    }

    for service in sample_services() {
        if db.get_service(&service.slug).await?.is_none() {
            db.create_service(&service).await?;
            info!("Created sample service '{}'", service.slug);
        }
    }

    let announcement = AnnouncementInput {
        slug: "new-training-season".to_string(),
        title: "Yeni eğitim dönemi başlıyor".to_string(),
        title_en: Some("New training season starts".to_string()),
        category: Some("Duyuru".to_string()),
        category_en: Some("News".to_string()),
        author: "Administrator".to_string(),
        ..Default::default()
    };
    if db.get_announcement(&announcement.slug).await?.is_none() {
        db.create_announcement(&announcement).await?;
        info!("Created sample announcement '{}'", announcement.slug);
    }

    Ok(())
}
