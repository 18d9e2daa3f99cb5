//! Reservations repository for database operations

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReservationStatus,
        reservation::{
            total_price, NewReservation, Reservation, ReservationClient, ReservationDetails,
            ReservationLine, ReservationLineDetails, ReservationQuery,
        },
    },
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Create a reservation as one transaction: locate the client by
    /// case-insensitive email (creating it if absent), insert the
    /// reservation in PREPARADA, insert its single line. Either everything
    /// is persisted or nothing is.
    pub async fn create(
        &self,
        new: &NewReservation,
    ) -> AppResult<(Reservation, ReservationLine)> {
        let mut tx = self.pool.begin().await?;

        let client_id: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM clients WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1",
        )
        .bind(&new.client_email)
        .fetch_optional(&mut *tx)
        .await?;

        let client_id = match client_id {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, i32>(
                    "INSERT INTO clients (name, email) VALUES ($1, $2) RETURNING id",
                )
                .bind(&new.client_name)
                .bind(&new.client_email)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (code, user_id, client_id, start_date, end_date, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new.code)
        .bind(new.user_id)
        .bind(client_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(ReservationStatus::Preparada)
        .bind(&new.notes)
        .fetch_one(&mut *tx)
        .await?;

        let line = sqlx::query_as::<_, ReservationLine>(
            r#"
            INSERT INTO reservation_lines (reservation_id, model_id, days, price_per_day, quantity)
            VALUES ($1, $2, $3, $4, 1)
            RETURNING *
            "#,
        )
        .bind(reservation.id)
        .bind(new.model_id)
        .bind(new.days)
        .bind(new.price_per_day)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((reservation, line))
    }

    /// Get one reservation with client and line details
    pub async fn get_details(&self, id: i32) -> AppResult<ReservationDetails> {
        let mut details = self
            .fetch_details(Some(id), None, &ReservationQuery { status: None, user_id: None })
            .await?;
        details
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// List reservations with details. When `owner` is set the listing is
    /// restricted to that user's reservations regardless of query filters.
    pub async fn search(
        &self,
        query: &ReservationQuery,
        owner: Option<i32>,
    ) -> AppResult<Vec<ReservationDetails>> {
        self.fetch_details(None, owner, query).await
    }

    async fn fetch_details(
        &self,
        id: Option<i32>,
        owner: Option<i32>,
        query: &ReservationQuery,
    ) -> AppResult<Vec<ReservationDetails>> {
        let user_filter = owner.or(query.user_id);

        let mut sql = String::from(
            r#"
            SELECT r.id, r.code, r.user_id, r.start_date, r.end_date, r.status, r.notes,
                   r.created_at,
                   c.id as client_id, c.name as client_name, c.surname as client_surname,
                   c.email as client_email
            FROM reservations r
            JOIN clients c ON r.client_id = c.id
            WHERE 1=1
            "#,
        );

        let mut idx = 0;
        if id.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND r.id = ${}", idx));
        }
        if user_filter.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND r.user_id = ${}", idx));
        }
        if query.status.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND r.status = ${}", idx));
        }
        sql.push_str(" ORDER BY r.created_at DESC");

        let mut q = sqlx::query(&sql);
        if let Some(id) = id {
            q = q.bind(id);
        }
        if let Some(user_id) = user_filter {
            q = q.bind(user_id);
        }
        if let Some(status) = query.status {
            q = q.bind(status);
        }

        let rows = q.fetch_all(&self.pool).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.get("id")).collect();
        let mut lines = self.fetch_lines(&ids).await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let reservation_id: i32 = row.get("id");
            let lines = lines.remove(&reservation_id).unwrap_or_default();
            let total = lines.iter().map(|l| l.line_total).sum();

            let client_name: String = row.get("client_name");
            let client_surname: Option<String> = row.get("client_surname");
            let name = match client_surname {
                Some(surname) => format!("{} {}", client_name, surname),
                None => client_name,
            };

            result.push(ReservationDetails {
                id: reservation_id,
                code: row.get("code"),
                user_id: row.get("user_id"),
                client: ReservationClient {
                    id: row.get("client_id"),
                    name,
                    email: row.get("client_email"),
                },
                start_date: row.get::<NaiveDate, _>("start_date"),
                end_date: row.get::<NaiveDate, _>("end_date"),
                status: row.get::<ReservationStatus, _>("status"),
                notes: row.get("notes"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
                lines,
                total,
            });
        }

        Ok(result)
    }

    async fn fetch_lines(
        &self,
        reservation_ids: &[i32],
    ) -> AppResult<HashMap<i32, Vec<ReservationLineDetails>>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.reservation_id, l.model_id, l.days, l.price_per_day, l.quantity,
                   m.brand, m.name
            FROM reservation_lines l
            JOIN models m ON l.model_id = m.id
            WHERE l.reservation_id = ANY($1)
            ORDER BY l.id
            "#,
        )
        .bind(reservation_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<ReservationLineDetails>> = HashMap::new();
        for row in rows {
            let days: i32 = row.get("days");
            let price_per_day: Decimal = row.get("price_per_day");
            let quantity: i32 = row.get("quantity");
            let brand: String = row.get("brand");
            let name: String = row.get("name");

            grouped
                .entry(row.get("reservation_id"))
                .or_default()
                .push(ReservationLineDetails {
                    id: row.get("id"),
                    model_id: row.get("model_id"),
                    model_name: format!("{} {}", brand, name).trim().to_string(),
                    days,
                    price_per_day,
                    quantity,
                    line_total: total_price(days, price_per_day) * Decimal::from(quantity),
                });
        }

        Ok(grouped)
    }

    /// Persist a status change
    pub async fn update_status(
        &self,
        id: i32,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Persist a date edit and the recomputed line day count in one
    /// transaction. The update only matches rows still in PREPARADA.
    pub async fn update_dates(
        &self,
        id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        days: i32,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET start_date = $2, end_date = $3, updated_at = now()
            WHERE id = $1 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(start_date)
        .bind(end_date)
        .bind(ReservationStatus::Preparada)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::BusinessRule(
                "Dates can only be edited while the reservation is prepared".to_string(),
            )
        })?;

        sqlx::query("UPDATE reservation_lines SET days = $2 WHERE reservation_id = $1")
            .bind(id)
            .bind(days)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(reservation)
    }
}
