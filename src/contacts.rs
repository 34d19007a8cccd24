use crate::errors::RidderError;
use crate::models::Contact;
use crate::sanitize::validate_contact;
use crate::service::RidderService;

impl RidderService {
    /// Gets a contact by its Ridder id.
    pub async fn get_contact(&self, ridder_id: i32) -> Result<Contact, RidderError> {
        tracing::info!("Fetching contact {} from Ridder", ridder_id);
        self.get(&format!("contacts?ridderid={}", ridder_id)).await
    }

    /// Creates a contact and returns the id Ridder assigned to it.
    ///
    /// An absent record is a no-op: `Ok(None)` without any request.
    pub async fn create_contact(&self, contact: Option<&Contact>) -> Result<Option<i32>, RidderError> {
        let Some(contact) = contact else {
            return Ok(None);
        };

        tracing::info!("Creating contact in Ridder (InsightlyId {})", contact.insightly_id);
        let validated = validate_contact(contact);
        let id = self.post("contacts", &validated).await?;
        Ok(Some(id))
    }

    /// Updates the contact identified by `contact.ridder_id`.
    pub async fn update_contact(&self, contact: Option<&Contact>) -> Result<Option<i32>, RidderError> {
        let Some(contact) = contact else {
            return Ok(None);
        };

        tracing::info!("Updating contact {} in Ridder", contact.ridder_id);
        let validated = validate_contact(contact);
        let id = self
            .post(&format!("contacts/{}", contact.ridder_id), &validated)
            .await?;
        Ok(Some(id))
    }
}
