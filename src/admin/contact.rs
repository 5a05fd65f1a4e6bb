use crate::client::{ApiClient, FetchError};
use crate::models::ContactInfo;
use tracing::{info, warn};

/// Edit form for the singleton contact record.
pub struct ContactEditor {
    client: ApiClient,
    contact: Option<ContactInfo>,
}

impl ContactEditor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            contact: None,
        }
    }

    /// Load the current record. A missing record leaves the form blank.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        match self.client.get_contact().await {
            Ok(contact) => self.contact = Some(contact),
            Err(err) if err.is_not_found() => self.contact = None,
            Err(err) => return Err(err),
        }
        Ok(())
    }

    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    /// Starting point for the form: the loaded record or an empty one.
    pub fn draft(&self) -> ContactInfo {
        self.contact.clone().unwrap_or_default()
    }

    pub async fn save(&mut self, update: &ContactInfo) -> Result<&ContactInfo, FetchError> {
        match self.client.update_contact(update).await {
            Ok(saved) => {
                info!("Contact info saved");
                Ok(self.contact.insert(saved))
            }
            Err(err) => {
                warn!("Failed to save contact info: {}", err);
                Err(err)
            }
        }
    }
}
