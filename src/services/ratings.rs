//! Ratings service

use crate::{
    error::{AppError, AppResult},
    models::{Rating, RatingInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct RatingsService {
    repository: Repository,
}

impl RatingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Rate a movie. A user holds at most one active rating per movie.
    pub async fn submit(&self, user_id: i32, event_id: i32, data: &RatingInput) -> AppResult<Rating> {
        let data = data.normalized()?;
        // 404 for unknown or retired movies
        self.repository.movies.get_by_id(event_id).await?;

        if self
            .repository
            .ratings
            .find_active_by_user(event_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("You already rated this movie".to_string()));
        }

        let rating = self.repository.ratings.create(event_id, user_id, &data).await?;
        tracing::info!(rating_id = rating.id, event_id, user_id, "rating submitted");
        Ok(rating)
    }

    /// Edit one of the user's own ratings
    pub async fn update(&self, user_id: i32, rating_id: i32, data: &RatingInput) -> AppResult<Rating> {
        let data = data.normalized()?;
        self.owned(user_id, rating_id).await?;
        self.repository.ratings.update(rating_id, &data).await
    }

    /// Retire one of the user's own ratings
    pub async fn delete(&self, user_id: i32, rating_id: i32) -> AppResult<()> {
        self.owned(user_id, rating_id).await?;
        self.repository.ratings.deactivate(rating_id).await?;
        tracing::info!(rating_id, user_id, "rating removed");
        Ok(())
    }

    async fn owned(&self, user_id: i32, rating_id: i32) -> AppResult<Rating> {
        let rating = self.repository.ratings.get_active(rating_id).await?;
        if rating.user_id != user_id {
            return Err(AppError::Authorization(
                "Only the author can change this rating".to_string(),
            ));
        }
        Ok(rating)
    }
}
