//! Ratings repository

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use super::movie_filter::ACTIVE;
use crate::{
    error::{AppError, AppResult},
    models::{Rating, RatingInput, RatingSummary},
};

const INACTIVE: &str = "no";

const RATING_COLUMNS: &str =
    "id, event_id, user_id, score, review, hashtag, created_at, updated_at";

#[derive(Clone)]
pub struct RatingsRepository {
    pool: Pool<Postgres>,
}

impl RatingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Average and number of active ratings of a movie
    pub async fn summary(&self, event_id: i32) -> AppResult<RatingSummary> {
        let row = sqlx::query(
            r#"
            SELECT AVG(score)::float8 AS average, COUNT(*) AS count
            FROM ratings
            WHERE event_id = $1 AND active = $2
            "#,
        )
        .bind(event_id)
        .bind(ACTIVE)
        .fetch_one(&self.pool)
        .await?;

        let average: Option<f64> = row.get("average");
        let count: i64 = row.get("count");
        Ok(RatingSummary::new(average, count))
    }

    /// Active ratings of a movie, newest first
    pub async fn list_active(&self, event_id: i32) -> AppResult<Vec<Rating>> {
        let query = format!(
            "SELECT {} FROM ratings WHERE event_id = $1 AND active = $2 \
             ORDER BY created_at DESC, id DESC",
            RATING_COLUMNS
        );
        let rows = sqlx::query_as::<_, Rating>(&query)
            .bind(event_id)
            .bind(ACTIVE)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get an active rating by ID
    pub async fn get_active(&self, id: i32) -> AppResult<Rating> {
        let query = format!(
            "SELECT {} FROM ratings WHERE id = $1 AND active = $2",
            RATING_COLUMNS
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .bind(ACTIVE)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rating {} not found", id)))
    }

    /// The user's active rating of a movie, if any
    pub async fn find_active_by_user(&self, event_id: i32, user_id: i32) -> AppResult<Option<Rating>> {
        let query = format!(
            "SELECT {} FROM ratings WHERE event_id = $1 AND user_id = $2 AND active = $3",
            RATING_COLUMNS
        );
        let row = sqlx::query_as::<_, Rating>(&query)
            .bind(event_id)
            .bind(user_id)
            .bind(ACTIVE)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a rating. `data` must already be normalized.
    pub async fn create(&self, event_id: i32, user_id: i32, data: &RatingInput) -> AppResult<Rating> {
        let query = format!(
            "INSERT INTO ratings (event_id, user_id, score, review, hashtag, active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            RATING_COLUMNS
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(event_id)
            .bind(user_id)
            .bind(data.score)
            .bind(&data.review)
            .bind(&data.hashtag)
            .bind(ACTIVE)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    AppError::Conflict("You already rated this movie".to_string())
                }
                other => AppError::Database(other),
            })
    }

    /// Replace score, review and hashtag of an active rating
    pub async fn update(&self, id: i32, data: &RatingInput) -> AppResult<Rating> {
        let query = format!(
            "UPDATE ratings SET score = $1, review = $2, hashtag = $3, updated_at = $4 \
             WHERE id = $5 AND active = $6 RETURNING {}",
            RATING_COLUMNS
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(data.score)
            .bind(&data.review)
            .bind(&data.hashtag)
            .bind(Utc::now())
            .bind(id)
            .bind(ACTIVE)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rating {} not found", id)))
    }

    /// Retire a rating
    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE ratings SET active = $1, updated_at = $2 WHERE id = $3 AND active = $4",
        )
        .bind(INACTIVE)
        .bind(Utc::now())
        .bind(id)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Rating {} not found", id)));
        }
        Ok(())
    }
}
