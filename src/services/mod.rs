//! Business logic services

pub mod cities;
pub mod listing;
pub mod movies;
pub mod ratings;

use std::sync::Arc;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub cities: cities::CitiesService,
    pub listing: listing::ListingService,
    pub movies: movies::MoviesService,
    pub ratings: ratings::RatingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            cities: cities::CitiesService::new(repository.clone()),
            listing: listing::ListingService::new(Arc::new(repository.movies.clone())),
            movies: movies::MoviesService::new(repository.clone()),
            ratings: ratings::RatingsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
