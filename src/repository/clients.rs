//! Client registry storage.
//!
//! The registry is defined as a trait with two implementations: the
//! Postgres-backed store used in production and an in-memory store used by
//! tests and fallback wiring. Callers receive the store by injection.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientQuery, CreateClient, UpdateClient},
};

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn search(&self, query: &ClientQuery) -> AppResult<Vec<Client>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Client>;
    /// Case-insensitive email lookup; returns the oldest match when several
    /// records share an email (uniqueness is advisory only)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>>;
    async fn create(&self, client: &CreateClient) -> AppResult<Client>;
    async fn update(&self, id: i32, client: &UpdateClient) -> AppResult<Client>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgClientStore {
    pool: Pool<Postgres>,
}

impl PgClientStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn search(&self, query: &ClientQuery) -> AppResult<Vec<Client>> {
        let mut sql = String::from("SELECT * FROM clients WHERE 1=1");
        if query.email.is_some() {
            sql.push_str(" AND LOWER(email) = LOWER($1)");
        }
        if query.name.is_some() {
            let idx = if query.email.is_some() { 2 } else { 1 };
            sql.push_str(&format!(
                " AND (LOWER(name) LIKE ${idx} OR LOWER(surname) LIKE ${idx})"
            ));
        }
        sql.push_str(" ORDER BY name, surname");

        let mut q = sqlx::query_as::<_, Client>(&sql);
        if let Some(ref email) = query.email {
            q = q.bind(email);
        }
        if let Some(ref name) = query.name {
            q = q.bind(format!("%{}%", name.to_lowercase()));
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn create(&self, client: &CreateClient) -> AppResult<Client> {
        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, surname, email, phone, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.surname)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i32, client: &UpdateClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                notes = COALESCE($6, notes),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&client.name)
        .bind(&client.surname)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::Conflict("Client has reservations and cannot be deleted".to_string())
                }
                _ => AppError::from(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Client with id {} not found", id)));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation (tests / fallback)
// ---------------------------------------------------------------------------

pub struct InMemoryClientStore {
    clients: Mutex<Vec<Client>>,
    next_id: AtomicI32,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn search(&self, query: &ClientQuery) -> AppResult<Vec<Client>> {
        let clients = self.clients.lock().expect("client store poisoned");
        let needle = query.name.as_deref().map(str::to_lowercase);
        Ok(clients
            .iter()
            .filter(|c| match query.email {
                Some(ref email) => c.email.eq_ignore_ascii_case(email),
                None => true,
            })
            .filter(|c| match needle {
                Some(ref n) => {
                    c.name.to_lowercase().contains(n)
                        || c.surname
                            .as_deref()
                            .map(|s| s.to_lowercase().contains(n))
                            .unwrap_or(false)
                }
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        let clients = self.clients.lock().expect("client store poisoned");
        clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        let clients = self.clients.lock().expect("client store poisoned");
        Ok(clients
            .iter()
            .filter(|c| c.email.eq_ignore_ascii_case(email))
            .min_by_key(|c| c.id)
            .cloned())
    }

    async fn create(&self, client: &CreateClient) -> AppResult<Client> {
        let created = Client {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: client.name.clone(),
            surname: client.surname.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            notes: client.notes.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        let mut clients = self.clients.lock().expect("client store poisoned");
        clients.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, update: &UpdateClient) -> AppResult<Client> {
        let mut clients = self.clients.lock().expect("client store poisoned");
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))?;

        if let Some(ref name) = update.name {
            client.name = name.clone();
        }
        if let Some(ref surname) = update.surname {
            client.surname = Some(surname.clone());
        }
        if let Some(ref email) = update.email {
            client.email = email.clone();
        }
        if let Some(ref phone) = update.phone {
            client.phone = Some(phone.clone());
        }
        if let Some(ref notes) = update.notes {
            client.notes = Some(notes.clone());
        }
        client.updated_at = Some(Utc::now());
        Ok(client.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut clients = self.clients.lock().expect("client store poisoned");
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() == before {
            return Err(AppError::NotFound(format!("Client with id {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(email: &str) -> CreateClient {
        CreateClient {
            name: "Marta".to_string(),
            surname: Some("Ruiz".to_string()),
            email: email.to_string(),
            phone: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn in_memory_store_assigns_unique_ids() {
        let store = InMemoryClientStore::new();
        let a = store.create(&new_client("a@example.com")).await.unwrap();
        let b = store.create(&new_client("b@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let store = InMemoryClientStore::new();
        store.create(&new_client("Marta@Example.com")).await.unwrap();
        let found = store.find_by_email("marta@example.COM").await.unwrap();
        assert!(found.is_some());
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_emails_are_tolerated_and_oldest_wins() {
        let store = InMemoryClientStore::new();
        let first = store.create(&new_client("dup@example.com")).await.unwrap();
        store.create(&new_client("dup@example.com")).await.unwrap();
        let found = store.find_by_email("dup@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let store = InMemoryClientStore::new();
        let created = store.create(&new_client("c@example.com")).await.unwrap();

        let update = UpdateClient {
            name: Some("Carmen".to_string()),
            surname: None,
            email: None,
            phone: Some("600123123".to_string()),
            notes: None,
        };
        let updated = store.update(created.id, &update).await.unwrap();
        assert_eq!(updated.name, "Carmen");
        assert_eq!(updated.surname.as_deref(), Some("Ruiz"));
        assert_eq!(updated.phone.as_deref(), Some("600123123"));

        store.delete(created.id).await.unwrap();
        assert!(store.get_by_id(created.id).await.is_err());
    }
}
