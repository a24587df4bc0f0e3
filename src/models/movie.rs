//! Movie (event) models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::rating::{Rating, RatingSummary};

/// Full movie record as stored in `events`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i32,
    pub name: String,
    /// Catalog category, contains "movie" for every row served here
    pub event_type: String,
    pub language: Option<String>,
    /// Comma separated genre labels, e.g. "Action, Comedy"
    pub genre: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    /// Poster image reference
    pub poster: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Movie row returned by listing and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MovieCard {
    pub id: i32,
    pub name: String,
    pub poster: Option<String>,
    pub language: Option<String>,
    pub genre: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Movie detail page payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovieDetails {
    pub movie: Movie,
    /// Individual genre labels of `movie.genre`
    pub genres: Vec<String>,
    pub rating: RatingSummary,
    /// Active reviews, newest first
    pub reviews: Vec<Rating>,
}

/// Split a denormalized genre field into trimmed, distinct labels.
///
/// Order of first appearance is kept; empty segments are dropped.
pub fn split_genres(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|g| g == token) {
            out.push(token.to_string());
        }
    }
    out
}
