//! User preferences service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::preferences::{UpdatePreferences, UserPreferences},
    repository::Repository,
};

#[derive(Clone)]
pub struct PreferencesService {
    repository: Repository,
}

impl PreferencesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a user's preferences, falling back to defaults when none are
    /// stored yet
    pub async fn get(&self, user_id: i32) -> AppResult<UserPreferences> {
        Ok(self
            .repository
            .preferences
            .get(user_id)
            .await?
            .unwrap_or_else(|| UserPreferences::default_for(user_id, Utc::now())))
    }

    /// Merge an update into the stored preferences; omitted fields keep
    /// their current value
    pub async fn update(
        &self,
        user_id: i32,
        update: UpdatePreferences,
    ) -> AppResult<UserPreferences> {
        let current = self.get(user_id).await?;

        let theme = update.theme.unwrap_or(current.theme);
        let favorites = update
            .favorite_model_ids
            .unwrap_or(current.favorite_model_ids);

        self.repository
            .preferences
            .upsert(user_id, theme, &favorites)
            .await
    }
}
