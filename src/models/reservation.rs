//! Reservation model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

use super::enums::ReservationStatus;

/// Reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    /// Opaque, human-shown booking code
    pub code: String,
    pub user_id: i32,
    pub client_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One priced line item within a reservation.
/// The per-day price is the price agreed at creation time, not a live
/// reference to the model: later catalog price changes never affect it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReservationLine {
    pub id: i32,
    pub reservation_id: i32,
    pub model_id: i32,
    pub days: i32,
    pub price_per_day: Decimal,
    pub quantity: i32,
}

/// Line item with the model's display name resolved for lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationLineDetails {
    pub id: i32,
    pub model_id: i32,
    pub model_name: String,
    pub days: i32,
    pub price_per_day: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// Client identity attached to a reservation for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationClient {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Reservation with full details for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDetails {
    pub id: i32,
    pub code: String,
    pub user_id: i32,
    pub client: ReservationClient,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<ReservationLineDetails>,
    /// Derived value: sum of line day-count × agreed price, never stored
    pub total: Decimal,
}

/// Create reservation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservation {
    pub model_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Client display name used when the caller's email has no client record yet
    pub client_name: Option<String>,
    pub notes: Option<String>,
}

/// Validated creation payload produced from a [`CreateReservation`] request:
/// dates checked, day count computed, per-day price snapshotted from the
/// model, code generated. This is what gets written, in one transaction.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i32,
    pub client_email: String,
    pub client_name: String,
    pub model_id: i32,
    pub code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i32,
    pub price_per_day: Decimal,
    pub notes: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationStatus {
    pub status: ReservationStatus,
}

/// Date edit request (owner only, PREPARADA only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Reservation list filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    pub status: Option<ReservationStatus>,
    pub user_id: Option<i32>,
}

/// Number of whole rental days in a date range.
/// Fails with a validation error unless `end` is strictly after `start`.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> AppResult<i32> {
    let days = (end - start).num_days();
    if days <= 0 {
        return Err(AppError::Validation(
            "Invalid date range: end date must be after start date".to_string(),
        ));
    }
    i32::try_from(days)
        .map_err(|_| AppError::Validation("Invalid date range: too many days".to_string()))
}

/// Total price for a day count at an agreed per-day price
pub fn total_price(days: i32, price_per_day: Decimal) -> Decimal {
    price_per_day * Decimal::from(days)
}

/// Generate a human-facing reservation code from a timestamp:
/// "R" followed by the millisecond timestamp in uppercase base 36.
pub fn generate_code(at: DateTime<Utc>) -> String {
    format!("R{}", to_base36(at.timestamp_millis().max(0) as u64))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_count_counts_whole_days() {
        assert_eq!(day_count(date(2026, 3, 1), date(2026, 3, 5)).unwrap(), 4);
        assert_eq!(day_count(date(2026, 2, 28), date(2026, 3, 1)).unwrap(), 1);
    }

    #[test]
    fn day_count_rejects_reversed_and_empty_ranges() {
        let err = day_count(date(2026, 3, 5), date(2026, 3, 1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = day_count(date(2026, 3, 1), date(2026, 3, 1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn total_price_is_days_times_rate() {
        let rate = Decimal::new(3500, 2); // 35.00
        let days = day_count(date(2026, 3, 1), date(2026, 3, 5)).unwrap();
        assert_eq!(total_price(days, rate), Decimal::new(14000, 2)); // 140.00
    }

    #[test]
    fn code_is_prefixed_base36_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let code = generate_code(at);
        assert!(code.starts_with('R'));
        let decoded = u64::from_str_radix(&code[1..], 36).unwrap();
        assert_eq!(decoded as i64, at.timestamp_millis());
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
    }
}
