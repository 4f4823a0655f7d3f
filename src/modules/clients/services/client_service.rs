use std::sync::Arc;

use crate::core::{AppError, Result, Valid};
use crate::middleware::SessionContext;
use crate::modules::clients::models::{Client, ClientDetailResponse, CreateClientRequest};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::estimates::repositories::EstimateRepository;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::recurring::repositories::RecurringInvoiceRepository;

/// Client management; the detail view pulls in every document billed to
/// the client.
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    estimates: Arc<dyn EstimateRepository>,
    recurring: Arc<dyn RecurringInvoiceRepository>,
}

impl ClientService {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        estimates: Arc<dyn EstimateRepository>,
        recurring: Arc<dyn RecurringInvoiceRepository>,
    ) -> Self {
        Self {
            clients,
            invoices,
            estimates,
            recurring,
        }
    }

    pub async fn create_client(
        &self,
        ctx: &SessionContext,
        request: Valid<CreateClientRequest>,
    ) -> Result<Client> {
        let request = request.into_inner();

        let client = Client::new(
            ctx.user_id.clone(),
            request.name,
            request.email,
            request.address,
            request.phone,
        );

        self.clients.create(&client).await?;

        tracing::info!(client_id = %client.id, "client created");

        Ok(client)
    }

    pub async fn list_clients(&self, ctx: &SessionContext) -> Result<Vec<Client>> {
        self.clients.list(&ctx.user_id).await
    }

    /// Client detail with its invoices, estimates, and recurring invoices.
    pub async fn get_client(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<ClientDetailResponse> {
        let client = self
            .clients
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client"))?;

        let invoices = self.invoices.list_by_client(&client.id, &ctx.user_id).await?;
        let estimates = self
            .estimates
            .list_by_client(&client.id, &ctx.user_id)
            .await?;
        let recurring = self
            .recurring
            .list_by_client(&client.id, &ctx.user_id)
            .await?;

        Ok(ClientDetailResponse::new(
            client, invoices, estimates, recurring,
        ))
    }
}
