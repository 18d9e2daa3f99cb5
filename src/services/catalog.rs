//! Catalog management service

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::model::{CreateModel, Model, ModelQuery, UpdateModel},
    repository::Repository,
};

use super::storage::StorageService;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    storage: StorageService,
}

impl CatalogService {
    pub fn new(repository: Repository, storage: StorageService) -> Self {
        Self { repository, storage }
    }

    /// List catalog models; archived entries only when requested
    pub async fn list_models(&self, query: &ModelQuery) -> AppResult<Vec<Model>> {
        self.repository.models.search(query).await
    }

    /// Get model by ID (archived entries included, so reservation lines
    /// always resolve)
    pub async fn get_model(&self, id: i32) -> AppResult<Model> {
        self.repository.models.get_by_id(id).await
    }

    /// Create a new catalog model
    pub async fn create_model(&self, model: CreateModel) -> AppResult<Model> {
        validate_model_fields(&model.brand, &model.name, model.price_per_day)?;
        self.repository.models.create(&model).await
    }

    /// Update an existing model
    pub async fn update_model(&self, id: i32, update: UpdateModel) -> AppResult<Model> {
        let current = self.repository.models.get_by_id(id).await?;

        let brand = update.brand.as_deref().unwrap_or(&current.brand);
        let name = update.name.as_deref().unwrap_or(&current.name);
        let price = update.price_per_day.unwrap_or(current.price_per_day);
        validate_model_fields(brand, name, price)?;

        self.repository.models.update(id, &update).await
    }

    /// Soft-delete a model: it disappears from the default listing, but the
    /// row stays so existing reservation lines keep a valid reference
    pub async fn archive_model(&self, id: i32) -> AppResult<()> {
        self.repository.models.get_by_id(id).await?;
        self.repository.models.archive(id).await
    }

    /// Upload a model image to object storage and persist its public URL
    pub async fn attach_image(
        &self,
        id: i32,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<Model> {
        self.repository.models.get_by_id(id).await?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Image file is empty".to_string()));
        }

        let url = self.storage.upload_image(filename, content_type, bytes).await?;
        self.repository.models.set_image_url(id, &url).await
    }
}

/// Display name (brand + model) must be non-empty after trimming, and the
/// per-day price strictly positive.
fn validate_model_fields(brand: &str, name: &str, price: Decimal) -> AppResult<()> {
    let display = format!("{} {}", brand, name);
    if display.trim().is_empty() {
        return Err(AppError::Validation(
            "Model name (brand and model) is required".to_string(),
        ));
    }
    if price <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Price per day must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_display_name_is_rejected() {
        let err = validate_model_fields("  ", "", Decimal::new(2500, 2)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(validate_model_fields("Honda", "", Decimal::new(2500, 2)).is_ok());
        assert!(validate_model_fields("", "CB125R", Decimal::new(2500, 2)).is_ok());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        for price in [Decimal::ZERO, Decimal::new(-100, 2)] {
            let err = validate_model_fields("Honda", "CB125R", price).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }
}
