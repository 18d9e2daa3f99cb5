//! Client registry service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientQuery, CreateClient, UpdateClient},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
}

impl ClientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search client records
    pub async fn search(&self, query: &ClientQuery) -> AppResult<Vec<Client>> {
        self.repository.clients.search(query).await
    }

    /// Get client by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        self.repository.clients.get_by_id(id).await
    }

    /// Create a client record. Email uniqueness is advisory: a duplicate
    /// email is logged, not rejected.
    pub async fn create(&self, client: CreateClient) -> AppResult<Client> {
        client
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(existing) = self.repository.clients.find_by_email(&client.email).await? {
            tracing::warn!(
                "Creating client with email {} already used by client {}",
                client.email,
                existing.id
            );
        }

        self.repository.clients.create(&client).await
    }

    /// Update a client record
    pub async fn update(&self, id: i32, client: UpdateClient) -> AppResult<Client> {
        client
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.clients.update(id, &client).await
    }

    /// Delete a client record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.clients.delete(id).await
    }
}
