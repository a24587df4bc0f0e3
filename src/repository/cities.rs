//! Cities repository

use sqlx::{Pool, Postgres};

use super::movie_filter::ACTIVE;
use crate::{
    error::{AppError, AppResult},
    models::City,
};

#[derive(Clone)]
pub struct CitiesRepository {
    pool: Pool<Postgres>,
}

impl CitiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List active cities by name
    pub async fn list_active(&self) -> AppResult<Vec<City>> {
        let rows = sqlx::query_as::<_, City>(
            "SELECT id, name FROM cities WHERE active = $1 ORDER BY name, id",
        )
        .bind(ACTIVE)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get an active city by ID
    pub async fn get_active(&self, id: i32) -> AppResult<City> {
        sqlx::query_as::<_, City>("SELECT id, name FROM cities WHERE id = $1 AND active = $2")
            .bind(id)
            .bind(ACTIVE)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("City {} not found", id)))
    }
}
