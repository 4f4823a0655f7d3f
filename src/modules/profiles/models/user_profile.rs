use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// The issuing company details shown on invoices and PDFs
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub company_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub tax_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        user_id: String,
        company_name: String,
        address: Option<String>,
        phone: Option<String>,
        tax_number: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            company_name,
            address,
            phone,
            tax_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; untouched fields keep their value.
    pub fn apply(&mut self, patch: UpdateProfileRequest) {
        if let Some(company_name) = patch.company_name {
            self.company_name = company_name;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(tax_number) = patch.tax_number {
            self.tax_number = Some(tax_number);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 2, message = "Company name must be at least 2 characters."))]
    pub company_name: String,

    pub address: Option<String>,

    pub phone: Option<String>,

    pub tax_number: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, message = "Company name must be at least 2 characters."))]
    pub company_name: Option<String>,

    pub address: Option<String>,

    pub phone: Option<String>,

    pub tax_number: Option<String>,
}
