use crate::models::{
    Announcement, AnnouncementInput, ContactInfo, MapCoordinates, Message, NewMessage,
    ServiceInput, ServiceItem, SocialMedia, User,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::str::FromStr;
use tracing::info;

const SCHEMA: &[(&str, &str)] = &[
    (
        "contact_info",
        "CREATE TABLE IF NOT EXISTS contact_info (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            address_en TEXT,
            working_hours TEXT,
            working_hours_en TEXT,
            website TEXT,
            instagram TEXT,
            linkedin TEXT,
            youtube TEXT,
            lat REAL NOT NULL DEFAULT 0,
            lng REAL NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        )",
    ),
    (
        "services",
        "CREATE TABLE IF NOT EXISTS services (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            title_en TEXT,
            description TEXT,
            description_en TEXT,
            details TEXT,
            details_en TEXT,
            benefits TEXT NOT NULL DEFAULT '[]',
            benefits_en TEXT NOT NULL DEFAULT '[]',
            process_steps TEXT NOT NULL DEFAULT '[]',
            process_steps_en TEXT NOT NULL DEFAULT '[]',
            duration TEXT,
            duration_en TEXT,
            format TEXT,
            format_en TEXT,
            features TEXT NOT NULL DEFAULT '[]',
            features_en TEXT NOT NULL DEFAULT '[]',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ),
    (
        "messages",
        "CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            subject TEXT,
            program INTEGER REFERENCES services(id) ON DELETE SET NULL,
            message TEXT NOT NULL,
            newsletter INTEGER NOT NULL DEFAULT 0,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ),
    (
        "announcements",
        "CREATE TABLE IF NOT EXISTS announcements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            title_en TEXT,
            description TEXT,
            description_en TEXT,
            content TEXT,
            content_en TEXT,
            category TEXT,
            category_en TEXT,
            author TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            images TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ),
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            title TEXT,
            is_admin INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
    ),
    (
        "sessions",
        "CREATE TABLE IF NOT EXISTS sessions (
            token_hash TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        )",
    ),
];

/// Whether `err` was caused by a UNIQUE constraint, e.g. a slug taken by a
/// concurrent insert.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<sqlx::Error>(),
            Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation()
        )
    })
}

/// Fields for a new admin or consultant account.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub title: Option<&'a str>,
    pub is_admin: bool,
}

#[derive(FromRow)]
struct ContactRow {
    phone: String,
    email: String,
    address: String,
    address_en: Option<String>,
    working_hours: Option<String>,
    working_hours_en: Option<String>,
    website: Option<String>,
    instagram: Option<String>,
    linkedin: Option<String>,
    youtube: Option<String>,
    lat: f64,
    lng: f64,
    updated_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactInfo {
    fn from(row: ContactRow) -> Self {
        ContactInfo {
            phone: row.phone,
            email: row.email,
            address: row.address,
            address_en: row.address_en,
            working_hours: row.working_hours,
            working_hours_en: row.working_hours_en,
            website: row.website,
            social_media: SocialMedia {
                instagram: row.instagram,
                linkedin: row.linkedin,
                youtube: row.youtube,
            },
            map_coordinates: MapCoordinates {
                lat: row.lat,
                lng: row.lng,
            },
            updated_at: Some(row.updated_at),
        }
    }
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `database_url` and create tables
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context(format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create database directory {:?}", parent))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context(format!("Failed to open database at {}", database_url))?;

        let db = Self { pool };
        db.create_tables().await?;
        Ok(db)
    }

    /// Private in-memory database, used by tests and local experiments.
    ///
    /// A single connection that never expires: every SQLite `:memory:`
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let db = Self { pool };
        db.create_tables().await?;
        Ok(db)
    }

    async fn create_tables(&self) -> Result<()> {
        for (table, ddl) in SCHEMA {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .context(format!("Failed to create {} table", table))?;
        }
        info!("Database schema ready");
        Ok(())
    }

    /// Round-trip check used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ==================== Contact Info ====================

    pub async fn get_contact(&self) -> Result<Option<ContactInfo>> {
        let row = sqlx::query_as::<_, ContactRow>("SELECT * FROM contact_info WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load contact info")?;

        Ok(row.map(ContactInfo::from))
    }

    /// Create the contact record if missing, otherwise overwrite it.
    /// There is never more than one row.
    pub async fn upsert_contact(&self, contact: &ContactInfo) -> Result<ContactInfo> {
        sqlx::query(
            "INSERT INTO contact_info (
                id, phone, email, address, address_en, working_hours, working_hours_en,
                website, instagram, linkedin, youtube, lat, lng, updated_at
            ) VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                phone = excluded.phone,
                email = excluded.email,
                address = excluded.address,
                address_en = excluded.address_en,
                working_hours = excluded.working_hours,
                working_hours_en = excluded.working_hours_en,
                website = excluded.website,
                instagram = excluded.instagram,
                linkedin = excluded.linkedin,
                youtube = excluded.youtube,
                lat = excluded.lat,
                lng = excluded.lng,
                updated_at = excluded.updated_at",
        )
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(&contact.address)
        .bind(&contact.address_en)
        .bind(&contact.working_hours)
        .bind(&contact.working_hours_en)
        .bind(&contact.website)
        .bind(&contact.social_media.instagram)
        .bind(&contact.social_media.linkedin)
        .bind(&contact.social_media.youtube)
        .bind(contact.map_coordinates.lat)
        .bind(contact.map_coordinates.lng)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to save contact info")?;

        self.get_contact()
            .await?
            .context("Contact info missing right after upsert")
    }

    // ==================== Messages ====================

    /// Store a contact-form submission. Identical submissions are stored twice.
    pub async fn create_message(&self, message: &NewMessage) -> Result<Message> {
        let now = Utc::now();
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (
                first_name, last_name, email, phone, subject, program, message,
                newsletter, is_read, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            RETURNING *",
        )
        .bind(message.first_name.as_deref().map(str::trim))
        .bind(message.last_name.as_deref().map(str::trim))
        .bind(message.email.as_deref().map(str::trim))
        .bind(&message.phone)
        .bind(&message.subject)
        .bind(message.program)
        .bind(&message.message)
        .bind(message.newsletter.unwrap_or(false))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save message")
    }

    /// Newest first, optionally restricted to read or unread messages
    pub async fn list_messages(&self, is_read: Option<bool>, limit: i64) -> Result<Vec<Message>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM messages");
        if let Some(is_read) = is_read {
            query.push(" WHERE is_read = ").push_bind(is_read);
        }
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit);

        query
            .build_query_as::<Message>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list messages")
    }

    pub async fn get_message(&self, id: i64) -> Result<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load message")
    }

    /// Mark a message as read. Returns `None` if it does not exist;
    /// marking an already-read message again is not an error.
    pub async fn mark_message_read(&self, id: i64) -> Result<Option<Message>> {
        sqlx::query_as::<_, Message>(
            "UPDATE messages SET is_read = 1, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to mark message as read")
    }

    pub async fn delete_message(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete message")?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== Services ====================

    pub async fn list_services(
        &self,
        limit: Option<i64>,
        is_active: Option<bool>,
    ) -> Result<Vec<ServiceItem>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM services");
        if let Some(is_active) = is_active {
            query.push(" WHERE is_active = ").push_bind(is_active);
        }
        query.push(" ORDER BY id ASC");
        if let Some(limit) = limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        query
            .build_query_as::<ServiceItem>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list services")
    }

    pub async fn get_service(&self, slug: &str) -> Result<Option<ServiceItem>> {
        sqlx::query_as::<_, ServiceItem>("SELECT * FROM services WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load service")
    }

    pub async fn service_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn create_service(&self, input: &ServiceInput) -> Result<ServiceItem> {
        let now = Utc::now();
        sqlx::query_as::<_, ServiceItem>(
            "INSERT INTO services (
                slug, title, title_en, description, description_en, details, details_en,
                benefits, benefits_en, process_steps, process_steps_en, duration, duration_en,
                format, format_en, features, features_en, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *",
        )
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.title_en)
        .bind(&input.description)
        .bind(&input.description_en)
        .bind(&input.details)
        .bind(&input.details_en)
        .bind(Json(&input.benefits))
        .bind(Json(&input.benefits_en))
        .bind(Json(&input.process_steps))
        .bind(Json(&input.process_steps_en))
        .bind(&input.duration)
        .bind(&input.duration_en)
        .bind(&input.format)
        .bind(&input.format_en)
        .bind(Json(&input.features))
        .bind(Json(&input.features_en))
        .bind(input.is_active.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context(format!("Failed to create service '{}'", input.slug))
    }

    /// Replace the service stored under `slug` (the slug itself may change).
    pub async fn update_service(
        &self,
        slug: &str,
        input: &ServiceInput,
    ) -> Result<Option<ServiceItem>> {
        sqlx::query_as::<_, ServiceItem>(
            "UPDATE services SET
                slug = ?, title = ?, title_en = ?, description = ?, description_en = ?,
                details = ?, details_en = ?, benefits = ?, benefits_en = ?,
                process_steps = ?, process_steps_en = ?, duration = ?, duration_en = ?,
                format = ?, format_en = ?, features = ?, features_en = ?,
                is_active = COALESCE(?, is_active), updated_at = ?
            WHERE slug = ?
            RETURNING *",
        )
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.title_en)
        .bind(&input.description)
        .bind(&input.description_en)
        .bind(&input.details)
        .bind(&input.details_en)
        .bind(Json(&input.benefits))
        .bind(Json(&input.benefits_en))
        .bind(Json(&input.process_steps))
        .bind(Json(&input.process_steps_en))
        .bind(&input.duration)
        .bind(&input.duration_en)
        .bind(&input.format)
        .bind(&input.format_en)
        .bind(Json(&input.features))
        .bind(Json(&input.features_en))
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context(format!("Failed to update service '{}'", slug))
    }

    pub async fn delete_service(&self, slug: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await
            .context("Failed to delete service")?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== Announcements ====================

    /// Most recent first
    pub async fn list_announcements(&self, limit: Option<i64>) -> Result<Vec<Announcement>> {
        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT * FROM announcements ORDER BY date DESC, id DESC");
        if let Some(limit) = limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        query
            .build_query_as::<Announcement>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list announcements")
    }

    pub async fn get_announcement(&self, slug: &str) -> Result<Option<Announcement>> {
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load announcement")
    }

    pub async fn create_announcement(&self, input: &AnnouncementInput) -> Result<Announcement> {
        let now = Utc::now();
        sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (
                slug, title, title_en, description, description_en, content, content_en,
                category, category_en, author, date, images, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *",
        )
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.title_en)
        .bind(&input.description)
        .bind(&input.description_en)
        .bind(&input.content)
        .bind(&input.content_en)
        .bind(&input.category)
        .bind(&input.category_en)
        .bind(&input.author)
        .bind(input.date.unwrap_or(now))
        .bind(Json(&input.images))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context(format!("Failed to create announcement '{}'", input.slug))
    }

    pub async fn update_announcement(
        &self,
        slug: &str,
        input: &AnnouncementInput,
    ) -> Result<Option<Announcement>> {
        sqlx::query_as::<_, Announcement>(
            "UPDATE announcements SET
                slug = ?, title = ?, title_en = ?, description = ?, description_en = ?,
                content = ?, content_en = ?, category = ?, category_en = ?, author = ?,
                date = COALESCE(?, date), images = ?, updated_at = ?
            WHERE slug = ?
            RETURNING *",
        )
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.title_en)
        .bind(&input.description)
        .bind(&input.description_en)
        .bind(&input.content)
        .bind(&input.content_en)
        .bind(&input.category)
        .bind(&input.category_en)
        .bind(&input.author)
        .bind(input.date)
        .bind(Json(&input.images))
        .bind(Utc::now())
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context(format!("Failed to update announcement '{}'", slug))
    }

    pub async fn delete_announcement(&self, slug: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await
            .context("Failed to delete announcement")?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== Users & Sessions ====================

    pub async fn create_user(&self, user: &NewUser<'_>) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, name, title, is_admin, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, 1, ?)
             RETURNING *",
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.name)
        .bind(user.title)
        .bind(user.is_admin)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context(format!("Failed to create user '{}'", user.username))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load user")
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list users")
    }

    pub async fn set_user_active(&self, user_id: i64, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to update user status")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn create_session(&self, token_hash: &str, user_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO sessions (token_hash, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token_hash)
            .bind(user_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .context("Failed to create session")?;
        Ok(())
    }

    /// The active user owning a session created at or after `since`, if any
    pub async fn find_session_user(
        &self,
        token_hash: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT users.* FROM sessions
             JOIN users ON users.id = sessions.user_id
             WHERE sessions.token_hash = ?
               AND julianday(sessions.created_at) >= julianday(?)
               AND users.is_active = 1",
        )
        .bind(token_hash)
        .bind(since)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to resolve session")
    }

    /// Drop sessions created before `before`; returns how many were removed.
    pub async fn prune_sessions(&self, before: DateTime<Utc>) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE julianday(created_at) < julianday(?)")
                .bind(before)
                .execute(&self.pool)
                .await
                .context("Failed to prune sessions")?;

        Ok(result.rows_affected())
    }

    pub async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    // ==================== Helper Functions ====================

    fn sample_contact() -> ContactInfo {
        ContactInfo {
            phone: "+90 212 555 00 00".to_string(),
            email: "info@example.com".to_string(),
            address: "Atatürk Havalimanı, İstanbul".to_string(),
            address_en: Some("Ataturk Airport, Istanbul".to_string()),
            social_media: SocialMedia {
                instagram: Some("https://instagram.com/academy".to_string()),
                ..Default::default()
            },
            map_coordinates: MapCoordinates {
                lat: 40.97,
                lng: 28.82,
            },
            ..Default::default()
        }
    }

    fn sample_message(email: Option<&str>) -> NewMessage {
        NewMessage {
            first_name: Some("Ayşe".to_string()),
            last_name: Some("Yılmaz".to_string()),
            email: email.map(str::to_string),
            message: Some("PPL eğitimi hakkında bilgi almak istiyorum".to_string()),
            ..Default::default()
        }
    }

    fn service_input(slug: &str, is_active: bool) -> ServiceInput {
        ServiceInput {
            slug: slug.to_string(),
            title: format!("Eğitim {}", slug),
            title_en: Some(format!("Training {}", slug)),
            benefits: vec!["Lisans".to_string(), "Kariyer".to_string()],
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    // ==================== Database Initialization Tests ====================

    #[tokio::test]
    async fn test_in_memory_database_starts_empty() {
        let db = Database::in_memory().await.expect("Should open");
        assert!(db.get_contact().await.unwrap().is_none());
        assert!(db.list_messages(None, 100).await.unwrap().is_empty());
        assert!(db.list_services(None, None).await.unwrap().is_empty());
        db.ping().await.expect("Should ping");
    }

    #[tokio::test]
    async fn test_database_reopening_keeps_data() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", temp_dir.path().join("site.db").display());

        {
            let db = Database::connect(&url).await.expect("Should create database");
            db.upsert_contact(&sample_contact()).await.unwrap();
        }

        let db = Database::connect(&url).await.expect("Should reopen database");
        let contact = db.get_contact().await.unwrap().expect("Contact should persist");
        assert_eq!(contact.phone, "+90 212 555 00 00");
    }

    // ==================== Contact Tests ====================

    #[tokio::test]
    async fn test_upsert_contact_creates_when_missing() {
        let db = Database::in_memory().await.unwrap();
        let saved = db.upsert_contact(&sample_contact()).await.unwrap();

        assert_eq!(saved.address_en.as_deref(), Some("Ataturk Airport, Istanbul"));
        assert_eq!(saved.map_coordinates.lat, 40.97);
        assert!(saved.social_media.instagram.is_some());
        assert!(saved.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_upsert_contact_twice_keeps_single_row() {
        let db = Database::in_memory().await.unwrap();
        db.upsert_contact(&sample_contact()).await.unwrap();
        db.upsert_contact(&sample_contact()).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_info")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_upsert_contact_overwrites_fields() {
        let db = Database::in_memory().await.unwrap();
        db.upsert_contact(&sample_contact()).await.unwrap();

        let mut updated = sample_contact();
        updated.phone = "+90 216 000 00 00".to_string();
        updated.address_en = None;
        let saved = db.upsert_contact(&updated).await.unwrap();

        assert_eq!(saved.phone, "+90 216 000 00 00");
        assert!(saved.address_en.is_none());
    }

    // ==================== Message Tests ====================

    #[tokio::test]
    async fn test_create_message_defaults() {
        let db = Database::in_memory().await.unwrap();
        let message = db
            .create_message(&sample_message(Some("ayse@example.com")))
            .await
            .unwrap();

        assert!(message.id > 0);
        assert!(!message.is_read);
        assert!(!message.newsletter);
        assert!(message.program.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_messages_are_both_stored() {
        let db = Database::in_memory().await.unwrap();
        let payload = sample_message(Some("ayse@example.com"));
        db.create_message(&payload).await.unwrap();
        db.create_message(&payload).await.unwrap();

        assert_eq!(db.list_messages(None, 100).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_messages_filters_by_read_state() {
        let db = Database::in_memory().await.unwrap();
        let first = db.create_message(&sample_message(Some("a@example.com"))).await.unwrap();
        db.create_message(&sample_message(Some("b@example.com"))).await.unwrap();
        db.mark_message_read(first.id).await.unwrap();

        let unread = db.list_messages(Some(false), 100).await.unwrap();
        let read = db.list_messages(Some(true), 100).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].id, first.id);
    }

    #[tokio::test]
    async fn test_list_messages_respects_limit() {
        let db = Database::in_memory().await.unwrap();
        for _ in 0..5 {
            db.create_message(&sample_message(Some("a@example.com"))).await.unwrap();
        }
        assert_eq!(db.list_messages(None, 3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mark_message_read_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let message = db.create_message(&sample_message(Some("a@example.com"))).await.unwrap();

        let first = db.mark_message_read(message.id).await.unwrap().expect("exists");
        let second = db.mark_message_read(message.id).await.unwrap().expect("still exists");
        assert!(first.is_read);
        assert!(second.is_read);
    }

    #[tokio::test]
    async fn test_mark_missing_message_returns_none() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.mark_message_read(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_message() {
        let db = Database::in_memory().await.unwrap();
        let message = db.create_message(&sample_message(Some("a@example.com"))).await.unwrap();

        assert!(db.delete_message(message.id).await.unwrap());
        assert!(!db.delete_message(message.id).await.unwrap());
        assert!(db.get_message(message.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_message_program_references_service() {
        let db = Database::in_memory().await.unwrap();
        let service = db.create_service(&service_input("ppl", true)).await.unwrap();

        let mut payload = sample_message(Some("a@example.com"));
        payload.program = Some(service.id);
        let message = db.create_message(&payload).await.unwrap();
        assert_eq!(message.program, Some(service.id));

        // Deleting the program keeps the message but clears the reference
        db.delete_service("ppl").await.unwrap();
        let message = db.get_message(message.id).await.unwrap().unwrap();
        assert!(message.program.is_none());
    }

    // ==================== Service Tests ====================

    #[tokio::test]
    async fn test_create_and_get_service() {
        let db = Database::in_memory().await.unwrap();
        db.create_service(&service_input("ppl", true)).await.unwrap();

        let service = db.get_service("ppl").await.unwrap().expect("exists");
        assert_eq!(service.title_en.as_deref(), Some("Training ppl"));
        assert_eq!(service.benefits, vec!["Lisans", "Kariyer"]);
        assert!(service.benefits_en.is_empty());
        assert!(service.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let db = Database::in_memory().await.unwrap();
        db.create_service(&service_input("ppl", true)).await.unwrap();
        assert!(db.create_service(&service_input("ppl", true)).await.is_err());
    }

    #[tokio::test]
    async fn test_list_services_limit_and_active_filter() {
        let db = Database::in_memory().await.unwrap();
        for i in 0..8 {
            db.create_service(&service_input(&format!("active-{}", i), true))
                .await
                .unwrap();
        }
        db.create_service(&service_input("retired", false)).await.unwrap();

        let services = db.list_services(Some(6), Some(true)).await.unwrap();
        assert_eq!(services.len(), 6);
        assert!(services.iter().all(|s| s.is_active));

        let inactive = db.list_services(None, Some(false)).await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].slug, "retired");

        assert_eq!(db.list_services(None, None).await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_update_service_keeps_active_flag_when_omitted() {
        let db = Database::in_memory().await.unwrap();
        db.create_service(&service_input("ppl", false)).await.unwrap();

        let mut input = service_input("ppl", false);
        input.is_active = None;
        input.title = "Yeni Başlık".to_string();
        let updated = db.update_service("ppl", &input).await.unwrap().expect("exists");

        assert_eq!(updated.title, "Yeni Başlık");
        assert!(!updated.is_active);
        assert!(db.update_service("missing", &input).await.unwrap().is_none());
    }

    // ==================== Announcement Tests ====================

    #[tokio::test]
    async fn test_announcements_newest_first() {
        let db = Database::in_memory().await.unwrap();
        let older = AnnouncementInput {
            slug: "older".to_string(),
            title: "Eski".to_string(),
            date: Some(Utc::now() - chrono::Duration::days(3)),
            ..Default::default()
        };
        let newer = AnnouncementInput {
            slug: "newer".to_string(),
            title: "Yeni".to_string(),
            images: vec!["/uploads/a.jpg".to_string()],
            ..Default::default()
        };
        db.create_announcement(&older).await.unwrap();
        db.create_announcement(&newer).await.unwrap();

        let all = db.list_announcements(None).await.unwrap();
        assert_eq!(all[0].slug, "newer");
        assert_eq!(all[0].images, vec!["/uploads/a.jpg"]);
        assert_eq!(db.list_announcements(Some(1)).await.unwrap().len(), 1);
        assert!(db.get_announcement("older").await.unwrap().is_some());
        assert!(db.delete_announcement("older").await.unwrap());
    }

    // ==================== User & Session Tests ====================

    #[tokio::test]
    async fn test_username_is_unique() {
        let db = Database::in_memory().await.unwrap();
        let user = NewUser {
            username: "admin",
            email: "admin@example.com",
            password_hash: "salt$hash",
            name: "Admin",
            title: None,
            is_admin: true,
        };
        db.create_user(&user).await.unwrap();
        let err = db.create_user(&user).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_duplicate_slug_insert_is_a_unique_violation() {
        let db = Database::in_memory().await.unwrap();
        let input = ServiceInput {
            slug: "ppl".to_string(),
            title: "PPL".to_string(),
            ..Default::default()
        };
        db.create_service(&input).await.unwrap();

        let err = db.create_service(&input).await.unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&anyhow::anyhow!("connection reset")));
    }

    #[tokio::test]
    async fn test_session_resolves_only_active_users() {
        let db = Database::in_memory().await.unwrap();
        let user = db
            .create_user(&NewUser {
                username: "consultant",
                email: "c@example.com",
                password_hash: "salt$hash",
                name: "Consultant",
                title: Some("Eğitim Danışmanı"),
                is_admin: false,
            })
            .await
            .unwrap();
        db.create_session("token-hash", user.id).await.unwrap();
        let since = Utc::now() - Duration::hours(1);

        let resolved = db
            .find_session_user("token-hash", since)
            .await
            .unwrap()
            .expect("active");
        assert_eq!(resolved.username, "consultant");

        db.set_user_active(user.id, false).await.unwrap();
        assert!(db.find_session_user("token-hash", since).await.unwrap().is_none());

        assert!(db.delete_session("token-hash").await.unwrap());
        assert!(!db.delete_session("token-hash").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_sessions_stop_resolving_and_are_pruned() {
        let db = Database::in_memory().await.unwrap();
        let user = db
            .create_user(&NewUser {
                username: "admin",
                email: "admin@example.com",
                password_hash: "salt$hash",
                name: "Admin",
                title: None,
                is_admin: true,
            })
            .await
            .unwrap();
        db.create_session("old", user.id).await.unwrap();

        // A cutoff after creation means the session has outlived its lifetime
        let later = Utc::now() + Duration::seconds(5);
        assert!(db.find_session_user("old", later).await.unwrap().is_none());

        let earlier = Utc::now() - Duration::hours(1);
        assert_eq!(db.prune_sessions(earlier).await.unwrap(), 0);
        assert_eq!(db.prune_sessions(later).await.unwrap(), 1);
        assert!(db.find_session_user("old", earlier).await.unwrap().is_none());
    }
}
