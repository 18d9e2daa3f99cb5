//! User preferences repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        enums::Theme,
        preferences::{PreferencesRow, UserPreferences},
    },
};

#[derive(Clone)]
pub struct PreferencesRepository {
    pool: Pool<Postgres>,
}

impl PreferencesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a user's stored preferences, if any
    pub async fn get(&self, user_id: i32) -> AppResult<Option<UserPreferences>> {
        let row = sqlx::query_as::<_, PreferencesRow>(
            "SELECT * FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserPreferences::from))
    }

    /// Insert or update a user's preferences
    pub async fn upsert(
        &self,
        user_id: i32,
        theme: Theme,
        favorite_model_ids: &[i32],
    ) -> AppResult<UserPreferences> {
        let row = sqlx::query_as::<_, PreferencesRow>(
            r#"
            INSERT INTO user_preferences (user_id, theme, favorite_model_ids, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (user_id) DO UPDATE
            SET theme = EXCLUDED.theme,
                favorite_model_ids = EXCLUDED.favorite_model_ids,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(theme)
        .bind(sqlx::types::Json(favorite_model_ids))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
