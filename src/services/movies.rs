//! Movie detail service

use crate::{
    error::AppResult,
    models::{split_genres, MovieDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct MoviesService {
    repository: Repository,
}

impl MoviesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Movie with its genres, rating summary and active reviews
    pub async fn details(&self, id: i32) -> AppResult<MovieDetails> {
        let movie = self.repository.movies.get_by_id(id).await?;
        let rating = self.repository.ratings.summary(id).await?;
        let reviews = self.repository.ratings.list_active(id).await?;
        let genres = movie.genre.as_deref().map(split_genres).unwrap_or_default();

        Ok(MovieDetails {
            movie,
            genres,
            rating,
            reviews,
        })
    }
}
