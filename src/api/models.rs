//! Catalog model endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::model::{CreateModel, Model, ModelQuery, UpdateModel},
};

use super::AuthenticatedUser;

/// List catalog models
#[utoipa::path(
    get,
    path = "/models",
    tag = "models",
    security(("bearer_auth" = [])),
    params(ModelQuery),
    responses(
        (status = 200, description = "List of models", body = Vec<Model>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Archived listing requires admin")
    )
)]
pub async fn list_models(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ModelQuery>,
) -> AppResult<Json<Vec<Model>>> {
    // Soft-deleted entries are admin-only
    if query.include_archived.unwrap_or(false) {
        claims.require_admin()?;
    }

    let models = state.services.catalog.list_models(&query).await?;
    Ok(Json(models))
}

/// Get model details by ID
#[utoipa::path(
    get,
    path = "/models/{id}",
    tag = "models",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Model ID")
    ),
    responses(
        (status = 200, description = "Model details", body = Model),
        (status = 404, description = "Model not found")
    )
)]
pub async fn get_model(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Model>> {
    let model = state.services.catalog.get_model(id).await?;
    Ok(Json(model))
}

/// Create a new model
#[utoipa::path(
    post,
    path = "/models",
    tag = "models",
    security(("bearer_auth" = [])),
    request_body = CreateModel,
    responses(
        (status = 201, description = "Model created", body = Model),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_model(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(model): Json<CreateModel>,
) -> AppResult<(StatusCode, Json<Model>)> {
    claims.require_admin()?;

    let created = state.services.catalog.create_model(model).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing model
#[utoipa::path(
    put,
    path = "/models/{id}",
    tag = "models",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Model ID")
    ),
    request_body = UpdateModel,
    responses(
        (status = 200, description = "Model updated", body = Model),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Model not found")
    )
)]
pub async fn update_model(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(model): Json<UpdateModel>,
) -> AppResult<Json<Model>> {
    claims.require_admin()?;

    let updated = state.services.catalog.update_model(id, model).await?;
    Ok(Json(updated))
}

/// Soft-delete a model
#[utoipa::path(
    delete,
    path = "/models/{id}",
    tag = "models",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Model ID")
    ),
    responses(
        (status = 204, description = "Model archived"),
        (status = 404, description = "Model not found")
    )
)]
pub async fn delete_model(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.catalog.archive_model(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a model image
#[utoipa::path(
    post,
    path = "/models/{id}/image",
    tag = "models",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Model ID")
    ),
    responses(
        (status = 200, description = "Image stored, public URL persisted", body = Model),
        (status = 400, description = "Missing or empty file field"),
        (status = 404, description = "Model not found"),
        (status = 502, description = "Object storage rejected the upload")
    )
)]
pub async fn upload_model_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<Json<Model>> {
    claims.require_admin()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("image.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
            .to_vec();

        let model = state
            .services
            .catalog
            .attach_image(id, &filename, &content_type, bytes)
            .await?;
        return Ok(Json(model));
    }

    Err(AppError::BadRequest("Missing \"file\" field".to_string()))
}
