use super::guard::Role;
use super::{fold_search, search_matches};
use crate::client::{ApiClient, FetchError};
use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn of(user: &User) -> UserStatus {
        if user.is_active {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring over name, username and email
    pub search: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| Role::of(user) != role) {
            return false;
        }
        if self.status.is_some_and(|status| UserStatus::of(user) != status) {
            return false;
        }

        let needle = fold_search(self.search.trim());
        search_matches(
            &needle,
            &[user.name.as_str(), user.username.as_str(), user.email.as_str()],
        )
    }
}

/// Read-only list of admin and consultant accounts.
pub struct UsersBoard {
    client: ApiClient,
    users: Vec<User>,
}

impl UsersBoard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            users: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), FetchError> {
        self.users = self.client.list_users().await?;
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn filtered(&self, filter: &UserFilter) -> Vec<&User> {
        self.users.iter().filter(|u| filter.matches(u)).collect()
    }
}
