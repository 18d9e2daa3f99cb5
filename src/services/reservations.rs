//! Reservation lifecycle service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{ReservationStatus, StatusChange},
        reservation::{
            day_count, generate_code, CreateReservation, NewReservation, Reservation,
            ReservationDetails, ReservationQuery, UpdateReservationDates,
        },
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a reservation for the authenticated caller.
    ///
    /// Validation happens before any write: the date range must span a
    /// positive number of days and the model must exist and be active. The
    /// model's current per-day price is snapshotted into the line; the
    /// client record, reservation and line are written in one transaction.
    pub async fn create(
        &self,
        claims: &UserClaims,
        request: CreateReservation,
    ) -> AppResult<ReservationDetails> {
        let days = day_count(request.start_date, request.end_date)?;

        let model = self.repository.models.get_by_id(request.model_id).await?;
        if !model.is_active() {
            return Err(AppError::BusinessRule(format!(
                "Model {} is no longer available",
                model.display_name()
            )));
        }

        let client_name = request
            .client_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&claims.sub)
            .to_string();

        let new = NewReservation {
            user_id: claims.user_id,
            client_email: claims.sub.clone(),
            client_name,
            model_id: model.id,
            code: generate_code(Utc::now()),
            start_date: request.start_date,
            end_date: request.end_date,
            days,
            price_per_day: model.price_per_day,
            notes: request.notes,
        };

        let (reservation, line) = self.repository.reservations.create(&new).await?;
        tracing::info!(
            "Reservation {} created for user {} ({} days at {}/day)",
            reservation.code,
            reservation.user_id,
            line.days,
            line.price_per_day
        );

        self.repository.reservations.get_details(reservation.id).await
    }

    /// List reservations: staff see everything (optionally filtered),
    /// everyone else only their own
    pub async fn list(
        &self,
        claims: &UserClaims,
        query: &ReservationQuery,
    ) -> AppResult<Vec<ReservationDetails>> {
        let owner = if claims.role.is_staff() {
            None
        } else {
            Some(claims.user_id)
        };
        self.repository.reservations.search(query, owner).await
    }

    /// Get one reservation with details; owner or staff only
    pub async fn get(&self, claims: &UserClaims, id: i32) -> AppResult<ReservationDetails> {
        let details = self.repository.reservations.get_details(id).await?;
        if !claims.role.is_staff() && details.user_id != claims.user_id {
            return Err(AppError::Authorization(
                "Not allowed to view this reservation".to_string(),
            ));
        }
        Ok(details)
    }

    /// Change a reservation's status.
    ///
    /// The transition table is checked centrally: admins may select any
    /// other status, non-admins may only cancel a non-terminal reservation
    /// they own. Re-selecting the current status performs no write.
    pub async fn change_status(
        &self,
        claims: &UserClaims,
        id: i32,
        requested: ReservationStatus,
    ) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.get_by_id(id).await?;

        if !claims.is_admin() && reservation.user_id != claims.user_id {
            return Err(AppError::Authorization(
                "Not allowed to modify this reservation".to_string(),
            ));
        }

        match ReservationStatus::authorize_change(reservation.status, requested, claims.role)? {
            StatusChange::NoOp => {
                tracing::debug!("Reservation {}: status {} unchanged", id, requested);
                Ok(reservation)
            }
            StatusChange::Apply => {
                tracing::info!(
                    "Reservation {}: status {} -> {}",
                    id,
                    reservation.status,
                    requested
                );
                self.repository.reservations.update_status(id, requested).await
            }
        }
    }

    /// Edit a reservation's date range.
    ///
    /// Only the owner may edit, and only while the reservation is still
    /// PREPARADA; the line's day count is recomputed and persisted with the
    /// new range.
    pub async fn update_dates(
        &self,
        claims: &UserClaims,
        id: i32,
        request: UpdateReservationDates,
    ) -> AppResult<ReservationDetails> {
        let reservation = self.repository.reservations.get_by_id(id).await?;

        if reservation.user_id != claims.user_id {
            return Err(AppError::Authorization(
                "Only the reservation owner may edit its dates".to_string(),
            ));
        }
        if reservation.status != ReservationStatus::Preparada {
            return Err(AppError::BusinessRule(format!(
                "Dates cannot be edited once the reservation is {}",
                reservation.status
            )));
        }

        let days = day_count(request.start_date, request.end_date)?;
        self.repository
            .reservations
            .update_dates(id, request.start_date, request.end_date, days)
            .await?;

        self.repository.reservations.get_details(id).await
    }
}
