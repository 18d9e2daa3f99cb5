//! Catalog models repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::model::{CreateModel, Model, ModelQuery, UpdateModel},
};

#[derive(Clone)]
pub struct ModelsRepository {
    pool: Pool<Postgres>,
}

impl ModelsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search catalog models. Archived entries are excluded unless the
    /// query asks for them.
    pub async fn search(&self, query: &ModelQuery) -> AppResult<Vec<Model>> {
        let mut sql = String::from("SELECT * FROM models WHERE 1=1");
        if !query.include_archived.unwrap_or(false) {
            sql.push_str(" AND archived_at IS NULL");
        }
        if query.search.is_some() {
            sql.push_str(" AND (LOWER(brand) LIKE $1 OR LOWER(name) LIKE $1)");
        }
        sql.push_str(" ORDER BY brand, name");

        let mut q = sqlx::query_as::<_, Model>(&sql);
        if let Some(ref search) = query.search {
            q = q.bind(format!("%{}%", search.to_lowercase()));
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Get model by ID. Archived entries still resolve so existing
    /// reservation lines keep a valid reference.
    pub async fn get_by_id(&self, id: i32) -> AppResult<Model> {
        sqlx::query_as::<_, Model>("SELECT * FROM models WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Model with id {} not found", id)))
    }

    /// Create a new catalog model
    pub async fn create(&self, model: &CreateModel) -> AppResult<Model> {
        let created = sqlx::query_as::<_, Model>(
            r#"
            INSERT INTO models (brand, name, description, displacement, image_url, price_per_day)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&model.brand)
        .bind(&model.name)
        .bind(&model.description)
        .bind(&model.displacement)
        .bind(&model.image_url)
        .bind(model.price_per_day)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing model; omitted fields are left unchanged
    pub async fn update(&self, id: i32, model: &UpdateModel) -> AppResult<Model> {
        sqlx::query_as::<_, Model>(
            r#"
            UPDATE models
            SET brand = COALESCE($2, brand),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                displacement = COALESCE($5, displacement),
                image_url = COALESCE($6, image_url),
                price_per_day = COALESCE($7, price_per_day),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&model.brand)
        .bind(&model.name)
        .bind(&model.description)
        .bind(&model.displacement)
        .bind(&model.image_url)
        .bind(model.price_per_day)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Model with id {} not found", id)))
    }

    /// Soft-delete: set the archived timestamp, keeping the row.
    /// Already-archived entries keep their original timestamp.
    pub async fn archive(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE models SET archived_at = COALESCE(archived_at, now()) WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Model with id {} not found", id)));
        }
        Ok(())
    }

    /// Persist the public URL of an uploaded model image
    pub async fn set_image_url(&self, id: i32, url: &str) -> AppResult<Model> {
        sqlx::query_as::<_, Model>(
            "UPDATE models SET image_url = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Model with id {} not found", id)))
    }
}
