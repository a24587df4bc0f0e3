//! Cities service

use crate::{error::AppResult, models::City, repository::Repository};

#[derive(Clone)]
pub struct CitiesService {
    repository: Repository,
}

impl CitiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<City>> {
        self.repository.cities.list_active().await
    }

    /// Resolve the city a user wants to browse; inactive cities are not found
    pub async fn select(&self, id: i32) -> AppResult<City> {
        let city = self.repository.cities.get_active(id).await?;
        tracing::debug!(city_id = city.id, "city selected");
        Ok(city)
    }
}
