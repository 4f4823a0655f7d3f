use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A customer that invoices, estimates, and recurring invoices are billed to
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Client {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        user_id: String,
        name: String,
        email: String,
        address: Option<String>,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            email,
            address,
            phone,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Client reference embedded in document responses
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&Client> for ClientSummary {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
            email: client.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 2, message = "Client name must be at least 2 characters."))]
    pub name: String,

    #[validate(email(message = "Invalid email address."))]
    pub email: String,

    pub address: Option<String>,

    pub phone: Option<String>,
}
