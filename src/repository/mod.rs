//! Repository layer for database operations

pub mod clients;
pub mod models;
pub mod preferences;
pub mod reservations;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use clients::{ClientStore, InMemoryClientStore, PgClientStore};

/// Main repository struct holding database connection pool.
/// The client registry is held behind [`ClientStore`] so callers can be
/// wired with the in-memory implementation in tests.
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub models: models::ModelsRepository,
    pub users: users::UsersRepository,
    pub reservations: reservations::ReservationsRepository,
    pub preferences: preferences::PreferencesRepository,
    pub clients: Arc<dyn ClientStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        let clients = Arc::new(PgClientStore::new(pool.clone()));
        Self::with_client_store(pool, clients)
    }

    /// Create a repository with an explicit client store implementation
    pub fn with_client_store(pool: Pool<Postgres>, clients: Arc<dyn ClientStore>) -> Self {
        Self {
            models: models::ModelsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            preferences: preferences::PreferencesRepository::new(pool.clone()),
            clients,
            pool,
        }
    }
}
