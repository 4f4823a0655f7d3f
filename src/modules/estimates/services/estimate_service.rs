use std::sync::Arc;

use crate::core::{AppError, Result, Valid};
use crate::middleware::SessionContext;
use crate::modules::clients::models::ClientSummary;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::documents::models::build_line_items;
use crate::modules::estimates::models::{
    CreateEstimateRequest, Estimate, EstimateResponse, EstimateStatus,
};
use crate::modules::estimates::repositories::EstimateRepository;

/// Estimate business logic; same shape as invoices with an expiry date
pub struct EstimateService {
    estimates: Arc<dyn EstimateRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl EstimateService {
    pub fn new(
        estimates: Arc<dyn EstimateRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self { estimates, clients }
    }

    pub async fn create_estimate(
        &self,
        ctx: &SessionContext,
        request: Valid<CreateEstimateRequest>,
    ) -> Result<EstimateResponse> {
        let request = request.into_inner();

        let client = self
            .clients
            .find_by_id(&request.client_id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client"))?;

        let items = build_line_items(&request.items)?;

        let estimate = Estimate::new(
            ctx.user_id.clone(),
            client.id.clone(),
            request.estimate_number,
            request.issue_date,
            request.expiry_date,
            request.notes,
            items,
        )?;

        self.estimates.create(&estimate).await?;

        tracing::info!(
            estimate_id = %estimate.id,
            estimate_number = %estimate.estimate_number,
            "estimate created"
        );

        Ok(EstimateResponse::from_estimate(
            &estimate,
            ClientSummary::from(&client),
        ))
    }

    pub async fn list_estimates(&self, ctx: &SessionContext) -> Result<Vec<EstimateResponse>> {
        let estimates = self.estimates.list(&ctx.user_id).await?;

        Ok(estimates
            .into_iter()
            .map(|record| EstimateResponse::from_estimate(&record.estimate, record.client))
            .collect())
    }

    pub async fn get_estimate(&self, ctx: &SessionContext, id: &str) -> Result<EstimateResponse> {
        let record = self
            .estimates
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Estimate"))?;

        Ok(EstimateResponse::from_estimate(
            &record.estimate,
            record.client,
        ))
    }

    pub async fn update_status(
        &self,
        ctx: &SessionContext,
        id: &str,
        new_status: EstimateStatus,
    ) -> Result<EstimateResponse> {
        let mut record = self
            .estimates
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Estimate"))?;

        record.estimate.update_status(new_status)?;
        self.estimates
            .update_status(id, &ctx.user_id, new_status)
            .await?;

        Ok(EstimateResponse::from_estimate(
            &record.estimate,
            record.client,
        ))
    }
}
