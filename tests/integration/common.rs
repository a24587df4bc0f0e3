//! Test database helpers

use chrono::{Duration, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Movie row to insert
#[derive(Clone)]
pub struct MovieRow {
    pub name: String,
    pub event_type: &'static str,
    pub language: Option<&'static str>,
    pub genre: Option<&'static str>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: &'static str,
}

impl MovieRow {
    /// Active movie showing from yesterday for a month
    pub fn showing(name: impl Into<String>, language: &'static str, genre: &'static str) -> Self {
        Self {
            name: name.into(),
            event_type: "Movie",
            language: Some(language),
            genre: Some(genre),
            start_date: today() - Duration::days(1),
            end_date: today() + Duration::days(30),
            active: "yes",
        }
    }
}

/// A fresh city with one active venue; every test works in its own city
pub struct Seed {
    pub pool: PgPool,
    pub city_id: i32,
    pub venue_id: i32,
}

impl Seed {
    pub async fn new(pool: &PgPool, name: &str) -> Seed {
        let city_id: i32 =
            sqlx::query_scalar("INSERT INTO cities (name, active) VALUES ($1, 'yes') RETURNING id")
                .bind(name)
                .fetch_one(pool)
                .await
                .unwrap();
        let venue_id = Self::insert_venue(pool, city_id, "yes").await;
        Seed { pool: pool.clone(), city_id, venue_id }
    }

    async fn insert_venue(pool: &PgPool, city_id: i32, active: &str) -> i32 {
        sqlx::query_scalar(
            "INSERT INTO venues (city_id, name, active) VALUES ($1, 'Screen', $2) RETURNING id",
        )
        .bind(city_id)
        .bind(active)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    pub async fn venue(&self, active: &str) -> i32 {
        Self::insert_venue(&self.pool, self.city_id, active).await
    }

    /// Insert a movie without scheduling it anywhere
    pub async fn event(&self, row: &MovieRow) -> i32 {
        sqlx::query_scalar(
            r#"
            INSERT INTO events (name, event_type, language, genre, poster, start_date, end_date, active)
            VALUES ($1, $2, $3, $4, 'poster.jpg', $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&row.name)
        .bind(row.event_type)
        .bind(row.language)
        .bind(row.genre)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.active)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn schedule(&self, event_id: i32, venue_id: i32, active: &str) {
        sqlx::query("INSERT INTO schedules (event_id, venue_id, active) VALUES ($1, $2, $3)")
            .bind(event_id)
            .bind(venue_id)
            .bind(active)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    /// Insert a movie scheduled at the city's venue
    pub async fn movie(&self, row: MovieRow) -> i32 {
        let id = self.event(&row).await;
        self.schedule(id, self.venue_id, "yes").await;
        id
    }

    pub async fn showing(&self, name: &str, language: &'static str, genre: &'static str) -> i32 {
        self.movie(MovieRow::showing(name, language, genre)).await
    }
}
