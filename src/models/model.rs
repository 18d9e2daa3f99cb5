//! Catalog model (rentable vehicle type) and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A rentable vehicle type (catalog entry, not a physical unit).
/// Soft-deletable: an archived entry keeps its row so existing reservation
/// lines keep a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Model {
    pub id: i32,
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
    /// Engine displacement label, e.g. "125cc"
    pub displacement: Option<String>,
    pub image_url: Option<String>,
    pub price_per_day: Decimal,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Brand and model name joined for display
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name).trim().to_string()
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }
}

/// Create model request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateModel {
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
    pub displacement: Option<String>,
    pub image_url: Option<String>,
    pub price_per_day: Decimal,
}

/// Update model request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateModel {
    pub brand: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub displacement: Option<String>,
    pub image_url: Option<String>,
    pub price_per_day: Option<Decimal>,
}

/// Model query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ModelQuery {
    /// Case-insensitive search over brand and name
    pub search: Option<String>,
    /// Include soft-deleted entries (admin listings)
    pub include_archived: Option<bool>,
}
