use crate::errors::RidderError;
use crate::models::Organization;
use crate::sanitize::validate_organization;
use crate::service::RidderService;

impl RidderService {
    /// Gets an organization by its Ridder id.
    pub async fn get_organization(&self, ridder_id: i32) -> Result<Organization, RidderError> {
        tracing::info!("Fetching organization {} from Ridder", ridder_id);
        self.get(&format!("organizations?ridderid={}", ridder_id)).await
    }

    /// Creates an organization and returns the id Ridder assigned to it.
    ///
    /// The name is truncated and stripped of special characters first; an
    /// absent record is a no-op.
    pub async fn create_organization(
        &self,
        organization: Option<&Organization>,
    ) -> Result<Option<i32>, RidderError> {
        let Some(organization) = organization else {
            return Ok(None);
        };

        tracing::info!(
            "Creating organization '{}' in Ridder",
            organization.organization_name
        );
        let validated = validate_organization(organization);
        let id = self.post("organizations", &validated).await?;
        Ok(Some(id))
    }

    pub async fn update_organization(
        &self,
        organization: Option<&Organization>,
    ) -> Result<Option<i32>, RidderError> {
        let Some(organization) = organization else {
            return Ok(None);
        };

        tracing::info!("Updating organization {} in Ridder", organization.ridder_id);
        let validated = validate_organization(organization);
        let id = self
            .post(&format!("organizations/{}", organization.ridder_id), &validated)
            .await?;
        Ok(Some(id))
    }
}
