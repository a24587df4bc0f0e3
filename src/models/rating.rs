//! Rating and review models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

const HASHTAG_MAX_LEN: usize = 32;

/// A user's score and review of one movie
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rating {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    /// Score from 0 to 5
    pub score: i16,
    pub review: Option<String>,
    /// Category label such as `#mustwatch`
    pub hashtag: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Average score of the active ratings of a movie
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    /// Rounded to one decimal, absent when nobody rated yet
    pub average: Option<f64>,
    pub count: i64,
}

impl RatingSummary {
    pub fn new(average: Option<f64>, count: i64) -> Self {
        Self {
            average: average.map(|a| (a * 10.0).round() / 10.0),
            count,
        }
    }
}

/// Submit or edit a rating
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RatingInput {
    #[validate(range(min = 0, max = 5, message = "Score must be between 0 and 5"))]
    pub score: i16,
    #[validate(length(max = 2000, message = "Review must be at most 2000 characters"))]
    pub review: Option<String>,
    /// Optional single label, with or without the leading `#`
    pub hashtag: Option<String>,
}

impl RatingInput {
    /// Validated copy with trimmed review and normalized hashtag
    pub fn normalized(&self) -> AppResult<RatingInput> {
        self.validate()?;
        let review = self
            .review
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from);
        let hashtag = match self.hashtag.as_deref() {
            Some(raw) => normalize_hashtag(raw)?,
            None => None,
        };
        Ok(RatingInput { score: self.score, review, hashtag })
    }
}

/// `mustwatch` / `#mustwatch` -> `#mustwatch`; blank -> none.
pub fn normalize_hashtag(raw: &str) -> AppResult<Option<String>> {
    let trimmed = raw.trim();
    let tag = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if tag.is_empty() {
        return Ok(None);
    }
    if tag.chars().count() > HASHTAG_MAX_LEN {
        return Err(AppError::Validation(format!(
            "Hashtag must be at most {} characters",
            HASHTAG_MAX_LEN
        )));
    }
    if !tag.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(AppError::Validation(
            "Hashtag may only contain letters, digits and underscores".to_string(),
        ));
    }
    Ok(Some(format!("#{}", tag)))
}
