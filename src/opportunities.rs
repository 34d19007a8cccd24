use crate::errors::RidderError;
use crate::models::{Opportunity, OpportunityResponse, Workflow};
use crate::sanitize::validate_opportunity;
use crate::service::RidderService;

impl RidderService {
    /// Gets an opportunity by its Ridder id.
    pub async fn get_opportunity(&self, ridder_id: i32) -> Result<Opportunity, RidderError> {
        tracing::info!("Fetching opportunity {} from Ridder", ridder_id);
        self.get(&format!("opportunities?ridderid={}", ridder_id)).await
    }

    /// Creates an opportunity.
    ///
    /// # Returns
    ///
    /// * `Result<Option<OpportunityResponse>, RidderError>` - The server-assigned
    ///   id, offer number and revision, or `None` for an absent record.
    pub async fn create_opportunity(
        &self,
        opportunity: Option<&Opportunity>,
    ) -> Result<Option<OpportunityResponse>, RidderError> {
        let Some(opportunity) = opportunity else {
            return Ok(None);
        };

        tracing::info!(
            "Creating opportunity '{}' in Ridder",
            opportunity.opportunity_name
        );
        let validated = validate_opportunity(opportunity);
        let response = self.post("opportunities", &validated).await?;
        Ok(Some(response))
    }

    /// Updates the opportunity identified by `opportunity.ridder_id`.
    ///
    /// Ridder compares `revision` against its own copy; the returned revision
    /// is the one to send next time.
    pub async fn update_opportunity(
        &self,
        opportunity: Option<&Opportunity>,
    ) -> Result<Option<OpportunityResponse>, RidderError> {
        let Some(opportunity) = opportunity else {
            return Ok(None);
        };

        tracing::info!(
            "Updating opportunity {} (revision {}) in Ridder",
            opportunity.ridder_id,
            opportunity.revision
        );
        let validated = validate_opportunity(opportunity);
        let response = self
            .post(&format!("opportunities/{}", opportunity.ridder_id), &validated)
            .await?;
        Ok(Some(response))
    }

    /// Triggers a server-side workflow transition.
    ///
    /// `Workflow::None` and an absent record return immediately without a
    /// request.
    pub async fn workflow_transition(
        &self,
        opportunity: Option<&Opportunity>,
        workflow: Workflow,
    ) -> Result<(), RidderError> {
        let Some(opportunity) = opportunity else {
            return Ok(());
        };
        if workflow == Workflow::None {
            return Ok(());
        }

        tracing::info!(
            "Applying workflow {} to opportunity {}",
            workflow,
            opportunity.ridder_id
        );
        self.post_without_response(
            &format!("opportunities/{}/{}", opportunity.ridder_id, workflow),
            opportunity,
        )
        .await
    }
}
