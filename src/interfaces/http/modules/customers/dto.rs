use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::customer::{CustomerDetails, EmergencyContact};
use crate::domain::Customer;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmergencyContactDto {
    #[validate(length(min = 1, message = "emergency contact name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "emergency contact phone is required"))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 100, message = "first name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last name must be 1-100 characters"))]
    pub last_name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Passport or ID card number
    pub id_document: Option<String>,
    pub address: Option<String>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContactDto>,
}

impl From<CustomerRequest> for CustomerDetails {
    fn from(r: CustomerRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            id_document: r.id_document,
            address: r.address,
            emergency_contact: r.emergency_contact.map(|c| EmergencyContact {
                name: c.name,
                phone: c.phone,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_document: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<EmergencyContactDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            full_name: c.full_name(),
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone: c.phone,
            id_document: c.id_document,
            address: c.address,
            emergency_contact: c.emergency_contact.map(|e| EmergencyContactDto {
                name: e.name,
                phone: e.phone,
            }),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCustomersParams {
    /// Matches first name, last name, email or phone
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
