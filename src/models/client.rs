//! Client (rental contact) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Client contact record, associated to reservations by email.
/// Distinct from an authenticated user: a client is created implicitly the
/// first time a reservation references a previously-unseen email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create client request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub surname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Update client request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub surname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Client query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ClientQuery {
    /// Case-insensitive match on email
    pub email: Option<String>,
    /// Case-insensitive search over name and surname
    pub name: Option<String>,
}
