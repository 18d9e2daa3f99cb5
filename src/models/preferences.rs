//! Per-user preferences (theme, favorite models)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::Theme;

/// Internal row structure: favorites are stored as a JSONB list
#[derive(Debug, Clone, FromRow)]
pub struct PreferencesRow {
    pub user_id: i32,
    pub theme: Theme,
    pub favorite_model_ids: sqlx::types::Json<Vec<i32>>,
    pub updated_at: DateTime<Utc>,
}

impl From<PreferencesRow> for UserPreferences {
    fn from(row: PreferencesRow) -> Self {
        UserPreferences {
            user_id: row.user_id,
            theme: row.theme,
            favorite_model_ids: row.favorite_model_ids.0,
            updated_at: row.updated_at,
        }
    }
}

/// Preferences record, one per user.
/// Favorite ids are not validated against the catalog: an archived model
/// may remain a favorite.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPreferences {
    pub user_id: i32,
    pub theme: Theme,
    pub favorite_model_ids: Vec<i32>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Defaults used when a user has no stored preferences yet
    pub fn default_for(user_id: i32, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            theme: Theme::default(),
            favorite_model_ids: Vec::new(),
            updated_at: now,
        }
    }
}

/// Update preferences request; omitted fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePreferences {
    pub theme: Option<Theme>,
    pub favorite_model_ids: Option<Vec<i32>>,
}
