//! Inbox of contact-form messages.
//!
//! Fetch-all, then filter locally. Mutations call the API and patch the local
//! list in place; a failed call is logged and leaves the list untouched.

use super::{fold_search, search_matches};
use crate::client::{fetch_secondary, ApiClient, FetchError};
use crate::models::Message;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Case-insensitive substring over first name, last name and email
    pub search: String,
    /// `Some(true)` read only, `Some(false)` unread only
    pub is_read: Option<bool>,
}

impl MessageFilter {
    pub fn matches(&self, message: &Message) -> bool {
        if let Some(is_read) = self.is_read {
            if message.is_read != is_read {
                return false;
            }
        }

        let needle = fold_search(self.search.trim());
        search_matches(
            &needle,
            &[
                message.first_name.as_str(),
                message.last_name.as_str(),
                message.email.as_str(),
            ],
        )
    }
}

pub struct MessagesBoard {
    client: ApiClient,
    messages: Vec<Message>,
}

impl MessagesBoard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            messages: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), FetchError> {
        self.messages = self.client.list_messages(None).await?;
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn filtered(&self, filter: &MessageFilter) -> Vec<&Message> {
        self.messages.iter().filter(|m| filter.matches(m)).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }

    /// Returns whether the server accepted the change.
    pub async fn mark_as_read(&mut self, id: i64) -> bool {
        match self.client.mark_message_read(id).await {
            Ok(_) => {
                if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
                    message.is_read = true;
                }
                true
            }
            Err(err) => {
                warn!("Failed to mark message {} as read: {}", id, err);
                false
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        match self.client.delete_message(id).await {
            Ok(()) => {
                self.messages.retain(|m| m.id != id);
                info!("Deleted message {}", id);
                true
            }
            Err(err) => {
                warn!("Failed to delete message {}: {}", id, err);
                false
            }
        }
    }
}

/// Unread count for the navigation badge. Never blocks the page.
pub async fn pending_badge(client: &ApiClient) -> usize {
    fetch_secondary("pending badge", client.list_messages(Some(false)))
        .await
        .len()
}
