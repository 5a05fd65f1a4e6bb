//! Content fetchers: one method per REST resource.
//!
//! Every call is a single round trip. Nothing is retried or cached, and the
//! records come back language-agnostic (both language fields present).

use super::error::FetchError;
use crate::config::Config;
use crate::models::{
    Announcement, AnnouncementInput, AnnouncementQuery, ContactInfo, LoginRequest,
    LoginResponse, Message, MessageQuery, NewMessage, ServiceInput, ServiceItem, ServiceQuery,
    User,
};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(request: RequestBuilder) -> Result<reqwest::Response, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(FetchError::from_response(status.as_u16(), body))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
        let response = Self::check(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError {
            message: format!("Failed to parse response: {}", e),
            status: Some(status),
            body,
        })
    }

    async fn send_empty(request: RequestBuilder) -> Result<(), FetchError> {
        Self::check(request).await.map(|_| ())
    }

    // ==================== Contact ====================

    pub async fn get_contact(&self) -> Result<ContactInfo, FetchError> {
        Self::send(self.request(Method::GET, "/api/contact")).await
    }

    pub async fn update_contact(&self, contact: &ContactInfo) -> Result<ContactInfo, FetchError> {
        Self::send(self.request(Method::PUT, "/api/contact").json(contact)).await
    }

    // ==================== Messages ====================

    pub async fn submit_message(&self, message: &NewMessage) -> Result<Message, FetchError> {
        Self::send(self.request(Method::POST, "/api/messages").json(message)).await
    }

    pub async fn list_messages(&self, is_read: Option<bool>) -> Result<Vec<Message>, FetchError> {
        let query = MessageQuery { is_read };
        Self::send(self.request(Method::GET, "/api/messages").query(&query)).await
    }

    pub async fn get_message(&self, id: i64) -> Result<Message, FetchError> {
        Self::send(self.request(Method::GET, &format!("/api/messages/{}", id))).await
    }

    pub async fn mark_message_read(&self, id: i64) -> Result<Message, FetchError> {
        Self::send(self.request(Method::PUT, &format!("/api/messages/{}/read", id))).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), FetchError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/messages/{}", id))).await
    }

    // ==================== Services ====================

    pub async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<ServiceItem>, FetchError> {
        Self::send(self.request(Method::GET, "/api/services").query(query)).await
    }

    pub async fn get_service(&self, slug: &str) -> Result<ServiceItem, FetchError> {
        Self::send(self.request(Method::GET, &format!("/api/services/{}", slug))).await
    }

    pub async fn create_service(&self, input: &ServiceInput) -> Result<ServiceItem, FetchError> {
        Self::send(self.request(Method::POST, "/api/services").json(input)).await
    }

    pub async fn update_service(
        &self,
        slug: &str,
        input: &ServiceInput,
    ) -> Result<ServiceItem, FetchError> {
        let path = format!("/api/services/{}", slug);
        Self::send(self.request(Method::PUT, &path).json(input)).await
    }

    pub async fn delete_service(&self, slug: &str) -> Result<(), FetchError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/services/{}", slug))).await
    }

    // ==================== Announcements ====================

    pub async fn list_announcements(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<Announcement>, FetchError> {
        let query = AnnouncementQuery { limit };
        Self::send(self.request(Method::GET, "/api/announcements").query(&query)).await
    }

    pub async fn get_announcement(&self, slug: &str) -> Result<Announcement, FetchError> {
        Self::send(self.request(Method::GET, &format!("/api/announcements/{}", slug))).await
    }

    pub async fn create_announcement(
        &self,
        input: &AnnouncementInput,
    ) -> Result<Announcement, FetchError> {
        Self::send(self.request(Method::POST, "/api/announcements").json(input)).await
    }

    pub async fn update_announcement(
        &self,
        slug: &str,
        input: &AnnouncementInput,
    ) -> Result<Announcement, FetchError> {
        let path = format!("/api/announcements/{}", slug);
        Self::send(self.request(Method::PUT, &path).json(input)).await
    }

    pub async fn delete_announcement(&self, slug: &str) -> Result<(), FetchError> {
        let path = format!("/api/announcements/{}", slug);
        Self::send_empty(self.request(Method::DELETE, &path)).await
    }

    // ==================== Auth & Users ====================

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, FetchError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        Self::send(self.request(Method::POST, "/api/auth/login").json(&body)).await
    }

    pub async fn logout(&self) -> Result<(), FetchError> {
        Self::send_empty(self.request(Method::POST, "/api/auth/logout")).await
    }

    pub async fn current_user(&self) -> Result<User, FetchError> {
        Self::send(self.request(Method::GET, "/api/auth/me")).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, FetchError> {
        Self::send(self.request(Method::GET, "/api/users")).await
    }
}
