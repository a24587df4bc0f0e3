//! Movies repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::movie_filter::{MovieFilter, SqlValue, Statement, ACTIVE};
use crate::{
    error::{AppError, AppResult},
    models::{listing::FacetRow, Movie, MovieCard},
};

/// Attach every bind value of a [`Statement`] to a sqlx query builder
macro_rules! bind_all {
    ($builder:expr, $binds:expr) => {{
        let mut builder = $builder;
        for value in $binds {
            builder = match value {
                SqlValue::Int(v) => builder.bind(*v),
                SqlValue::BigInt(v) => builder.bind(*v),
                SqlValue::Text(v) => builder.bind(v.clone()),
                SqlValue::Date(v) => builder.bind(*v),
            };
        }
        builder
    }};
}

/// Read access to the listable movie catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// One page of movies matching `filter`
    async fn list_page(&self, filter: &MovieFilter, page: i64, per_page: i64)
        -> AppResult<Vec<MovieCard>>;

    /// Total movies matching `filter`
    async fn count(&self, filter: &MovieFilter) -> AppResult<i64>;

    /// Raw facet values of the catalog selected by `filter`
    async fn facet_rows(&self, filter: &MovieFilter) -> AppResult<Vec<FacetRow>>;

    /// Movies of the filter's city whose name contains `term`
    async fn search(&self, filter: &MovieFilter, term: &str, limit: i64)
        -> AppResult<Vec<MovieCard>>;
}

#[derive(Clone)]
pub struct MoviesRepository {
    pool: Pool<Postgres>,
}

impl MoviesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn fetch_cards(&self, stmt: Statement) -> AppResult<Vec<MovieCard>> {
        let rows = bind_all!(sqlx::query_as::<_, MovieCard>(&stmt.sql), &stmt.binds)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get an active movie by ID, regardless of city or showing window
    pub async fn get_by_id(&self, id: i32) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, name, event_type, language, genre, description, duration,
                   poster, start_date, end_date, created_at
            FROM events
            WHERE id = $1 AND active = $2 AND event_type ILIKE '%movie%'
            "#,
        )
        .bind(id)
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))
    }
}

#[async_trait]
impl MovieCatalog for MoviesRepository {
    async fn list_page(
        &self,
        filter: &MovieFilter,
        page: i64,
        per_page: i64,
    ) -> AppResult<Vec<MovieCard>> {
        self.fetch_cards(filter.predicate().select_page(page, per_page)).await
    }

    async fn count(&self, filter: &MovieFilter) -> AppResult<i64> {
        let stmt = filter.predicate().select_count();
        let total = bind_all!(sqlx::query_scalar::<_, i64>(&stmt.sql), &stmt.binds)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn facet_rows(&self, filter: &MovieFilter) -> AppResult<Vec<FacetRow>> {
        let stmt = filter.base_predicate().select_facets();
        let rows = bind_all!(sqlx::query_as::<_, FacetRow>(&stmt.sql), &stmt.binds)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search(
        &self,
        filter: &MovieFilter,
        term: &str,
        limit: i64,
    ) -> AppResult<Vec<MovieCard>> {
        let stmt = filter.base_predicate().and_name_contains(term).select_page(1, limit);
        self.fetch_cards(stmt).await
    }
}
