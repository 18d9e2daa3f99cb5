//! Reservation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::reservation::{
        CreateReservation, Reservation, ReservationDetails, ReservationQuery,
        UpdateReservationDates, UpdateReservationStatus,
    },
};

use super::AuthenticatedUser;

/// Create a new reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = ReservationDetails),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Model not found"),
        (status = 422, description = "Model no longer available")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<ReservationDetails>)> {
    let details = state.services.reservations.create(&claims, request).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// List reservations: staff see all, other users only their own
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(ReservationQuery),
    responses(
        (status = 200, description = "List of reservations", body = Vec<ReservationDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.services.reservations.list(&claims, &query).await?;
    Ok(Json(reservations))
}

/// Get reservation details
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDetails),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReservationDetails>> {
    let details = state.services.reservations.get(&claims, id).await?;
    Ok(Json(details))
}

/// Change a reservation's status
#[utoipa::path(
    put,
    path = "/reservations/{id}/status",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservationStatus,
    responses(
        (status = 200, description = "Status after the request", body = Reservation),
        (status = 403, description = "Transition not allowed for this role"),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Transition not allowed from the current status")
    )
)]
pub async fn update_reservation_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateReservationStatus>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .services
        .reservations
        .change_status(&claims, id, request.status)
        .await?;
    Ok(Json(reservation))
}

/// Edit a reservation's date range (owner only, PREPARADA only)
#[utoipa::path(
    put,
    path = "/reservations/{id}/dates",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservationDates,
    responses(
        (status = 200, description = "Reservation with recomputed line", body = ReservationDetails),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "Not the owner"),
        (status = 422, description = "Reservation is no longer editable")
    )
)]
pub async fn update_reservation_dates(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateReservationDates>,
) -> AppResult<Json<ReservationDetails>> {
    let details = state
        .services
        .reservations
        .update_dates(&claims, id, request)
        .await?;
    Ok(Json(details))
}
