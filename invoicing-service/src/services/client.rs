//! Client CRUD orchestration.

use std::sync::Arc;

use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::client::{ClientResponse, CreateClientRequest, UpdateClientRequest};
use crate::models::Client;
use crate::store::ClientStore;

#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientStore>) -> Self {
        Self { clients }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ClientResponse, AppError> {
        let client = self.require(id).await?;
        Ok(ClientResponse::from(&client))
    }

    pub async fn get_all(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ClientResponse>, AppError> {
        let clients = self.clients.get_all(page, page_size).await?;
        Ok(clients.iter().map(ClientResponse::from).collect())
    }

    #[instrument(skip(self, req))]
    pub async fn create(&self, req: CreateClientRequest) -> Result<ClientResponse, AppError> {
        req.validate()?;

        let client = Client::new(req.name, req.email, req.address)?;
        self.clients.add(&client).await?;

        info!(client_id = %client.id(), "client created");
        Ok(ClientResponse::from(&client))
    }

    #[instrument(skip(self, req))]
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateClientRequest,
    ) -> Result<ClientResponse, AppError> {
        req.validate()?;

        let mut client = self.require(id).await?;
        client.update(req.name, req.email, req.address)?;
        self.clients.update(&client).await?;

        Ok(ClientResponse::from(&client))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut client = self.require(id).await?;
        client.mark_as_deleted();
        self.clients.update(&client).await?;

        info!(client_id = %id, "client deleted");
        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Client, AppError> {
        self.clients
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))
    }
}
