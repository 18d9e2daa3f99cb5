//! Business logic services

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod preferences;
pub mod reservations;
pub mod storage;

use crate::{
    config::{AuthConfig, StorageConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub clients: clients::ClientsService,
    pub reservations: reservations::ReservationsService,
    pub preferences: preferences::PreferencesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        storage_config: StorageConfig,
    ) -> Self {
        let storage = storage::StorageService::new(storage_config);
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone(), storage),
            clients: clients::ClientsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            preferences: preferences::PreferencesService::new(repository),
        }
    }
}
