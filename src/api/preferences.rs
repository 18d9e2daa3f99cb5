//! Per-user preference endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::preferences::{UpdatePreferences, UserPreferences},
};

use super::AuthenticatedUser;

/// Get the authenticated user's preferences
#[utoipa::path(
    get,
    path = "/preferences",
    tag = "preferences",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored preferences (defaults if none saved)", body = UserPreferences),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_preferences(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state.services.preferences.get(claims.user_id).await?;
    Ok(Json(preferences))
}

/// Update the authenticated user's preferences
#[utoipa::path(
    put,
    path = "/preferences",
    tag = "preferences",
    security(("bearer_auth" = [])),
    request_body = UpdatePreferences,
    responses(
        (status = 200, description = "Updated preferences", body = UserPreferences),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_preferences(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdatePreferences>,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state
        .services
        .preferences
        .update(claims.user_id, request)
        .await?;
    Ok(Json(preferences))
}
