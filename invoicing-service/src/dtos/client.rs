use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::rules;
use crate::models::Client;

/// Payload for creating a client.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    #[validate(custom(function = "rules::client_name"))]
    #[schema(example = "Acme Corp")]
    pub name: String,

    #[validate(custom(function = "rules::client_email"))]
    #[schema(example = "billing@acme.example")]
    pub email: String,

    #[validate(custom(function = "rules::client_address"))]
    #[schema(example = "1 Industrial Way")]
    pub address: String,
}

/// Payload for updating a client. Same rule set as creation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClientRequest {
    #[validate(custom(function = "rules::client_name"))]
    pub name: String,

    #[validate(custom(function = "rules::client_email"))]
    pub email: String,

    #[validate(custom(function = "rules::client_address"))]
    pub address: String,
}

/// Read view of a client.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id(),
            name: client.name().to_string(),
            email: client.email().to_string(),
            address: client.address().to_string(),
        }
    }
}
