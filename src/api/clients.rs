//! Client registry endpoints (admin/staff only)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::client::{Client, ClientQuery, CreateClient, UpdateClient},
};

use super::AuthenticatedUser;

/// List client records
#[utoipa::path(
    get,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(ClientQuery),
    responses(
        (status = 200, description = "List of clients", body = Vec<Client>),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn list_clients(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<Vec<Client>>> {
    claims.require_staff()?;

    let clients = state.services.clients.search(&query).await?;
    Ok(Json(clients))
}

/// Get client details by ID
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client details", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Client>> {
    claims.require_staff()?;

    let client = state.services.clients.get_by_id(id).await?;
    Ok(Json(client))
}

/// Create a client record
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn create_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(client): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    claims.require_staff()?;

    let created = state.services.clients.create(client).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a client record
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(client): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    claims.require_staff()?;

    let updated = state.services.clients.update(id, client).await?;
    Ok(Json(updated))
}

/// Delete a client record
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client has reservations")
    )
)]
pub async fn delete_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
