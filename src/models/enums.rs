//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// User role driving permission checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    /// Workshop staff: may manage the client registry but not the catalog
    Mecanico,
    Normal,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Mecanico => "MECANICO",
            Role::Normal => "NORMAL",
        }
    }

    /// Admin and workshop staff
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Mecanico)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MECANICO" => Ok(Role::Mecanico),
            "NORMAL" => Ok(Role::Normal),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Role::Normal)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

// SQLx conversion for Role (stored as TEXT)
impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Reservation lifecycle status.
///
/// Nominal sequence: PREPARADA → ENTREGADA → DEVUELTA → REVISION → FINALIZADA,
/// with CANCELADA reachable from any non-terminal state. FINALIZADA and
/// CANCELADA are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Preparada,
    Entregada,
    Devuelta,
    Revision,
    Finalizada,
    Cancelada,
}

/// Outcome of an authorized status-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Requested status equals the current one; nothing is written
    NoOp,
    /// Transition is allowed and must be persisted
    Apply,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Preparada => "PREPARADA",
            ReservationStatus::Entregada => "ENTREGADA",
            ReservationStatus::Devuelta => "DEVUELTA",
            ReservationStatus::Revision => "REVISION",
            ReservationStatus::Finalizada => "FINALIZADA",
            ReservationStatus::Cancelada => "CANCELADA",
        }
    }

    /// Terminal states admit no further transition for non-admin users
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Finalizada | ReservationStatus::Cancelada)
    }

    /// Next state in the nominal sequence, if any. Informational only:
    /// admins select states directly and are not bound to this order.
    pub fn next(&self) -> Option<ReservationStatus> {
        match self {
            ReservationStatus::Preparada => Some(ReservationStatus::Entregada),
            ReservationStatus::Entregada => Some(ReservationStatus::Devuelta),
            ReservationStatus::Devuelta => Some(ReservationStatus::Revision),
            ReservationStatus::Revision => Some(ReservationStatus::Finalizada),
            ReservationStatus::Finalizada | ReservationStatus::Cancelada => None,
        }
    }

    /// Central transition check for a status-change request.
    ///
    /// - Admins may select any status directly; re-selecting the current
    ///   one is a no-op (no write, no event).
    /// - Everyone else may only request CANCELADA, and only while the
    ///   reservation is in a non-terminal state.
    pub fn authorize_change(
        current: ReservationStatus,
        requested: ReservationStatus,
        role: Role,
    ) -> AppResult<StatusChange> {
        if role == Role::Admin {
            if requested == current {
                return Ok(StatusChange::NoOp);
            }
            return Ok(StatusChange::Apply);
        }

        if requested != ReservationStatus::Cancelada {
            return Err(AppError::Authorization(format!(
                "Only administrators may set status {}",
                requested
            )));
        }

        if current.is_terminal() {
            return Err(AppError::BusinessRule(format!(
                "Cannot cancel a reservation in status {}",
                current
            )));
        }

        Ok(StatusChange::Apply)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PREPARADA" => Ok(ReservationStatus::Preparada),
            "ENTREGADA" => Ok(ReservationStatus::Entregada),
            "DEVUELTA" => Ok(ReservationStatus::Devuelta),
            "REVISION" => Ok(ReservationStatus::Revision),
            "FINALIZADA" => Ok(ReservationStatus::Finalizada),
            "CANCELADA" => Ok(ReservationStatus::Cancelada),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

// SQLx conversion for ReservationStatus (stored as TEXT)
impl sqlx::Type<Postgres> for ReservationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for ReservationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ReservationStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// UI theme preference stored per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::System
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(format!("Invalid theme: {}", s)),
        }
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

// SQLx conversion for Theme (stored as TEXT)
impl sqlx::Type<Postgres> for Theme {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Theme {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Theme {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_current_status_is_a_noop() {
        let change = ReservationStatus::authorize_change(
            ReservationStatus::Entregada,
            ReservationStatus::Entregada,
            Role::Admin,
        )
        .unwrap();
        assert_eq!(change, StatusChange::NoOp);
    }

    #[test]
    fn admin_may_select_any_other_status() {
        let change = ReservationStatus::authorize_change(
            ReservationStatus::Preparada,
            ReservationStatus::Revision,
            Role::Admin,
        )
        .unwrap();
        assert_eq!(change, StatusChange::Apply);
    }

    #[test]
    fn user_may_only_cancel() {
        let err = ReservationStatus::authorize_change(
            ReservationStatus::Preparada,
            ReservationStatus::Entregada,
            Role::Normal,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));

        let change = ReservationStatus::authorize_change(
            ReservationStatus::Entregada,
            ReservationStatus::Cancelada,
            Role::Normal,
        )
        .unwrap();
        assert_eq!(change, StatusChange::Apply);
    }

    #[test]
    fn cancel_from_terminal_state_is_rejected() {
        for terminal in [ReservationStatus::Finalizada, ReservationStatus::Cancelada] {
            let err = ReservationStatus::authorize_change(
                terminal,
                ReservationStatus::Cancelada,
                Role::Normal,
            )
            .unwrap_err();
            assert!(matches!(err, AppError::BusinessRule(_)));
        }
    }

    #[test]
    fn nominal_sequence_terminates() {
        let mut status = ReservationStatus::Preparada;
        let mut hops = 0;
        while let Some(next) = status.next() {
            status = next;
            hops += 1;
        }
        assert_eq!(status, ReservationStatus::Finalizada);
        assert_eq!(hops, 4);
    }

    #[test]
    fn status_round_trips_through_strings() {
        let status: ReservationStatus = "preparada".parse().unwrap();
        assert_eq!(status, ReservationStatus::Preparada);
        assert_eq!(status.as_str(), "PREPARADA");
        assert!("ENTREGADO".parse::<ReservationStatus>().is_err());
    }
}
