//! Movie listing service
//!
//! Runs the page, count and facet queries for one listing request. Each query
//! fails on its own: the failure is logged with the request's filters and that
//! section of the page is rendered empty instead of failing the request.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        listing::{total_pages, FacetValue, Facets, MovieListQuery, MovieListing, PAGE_SIZE},
        MovieCard,
    },
    repository::{movie_filter::MovieFilter, movies::MovieCatalog},
};

/// Upper bound of name search results
pub const SEARCH_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct ListingService {
    catalog: Arc<dyn MovieCatalog>,
}

impl ListingService {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    /// Listing of the movies showing today in `city_id`
    pub async fn list_movies(&self, city_id: i32, query: &MovieListQuery) -> AppResult<MovieListing> {
        self.list_movies_on(city_id, query, Utc::now().date_naive()).await
    }

    /// Listing of the movies showing on `today` in `city_id`
    pub async fn list_movies_on(
        &self,
        city_id: i32,
        query: &MovieListQuery,
        today: NaiveDate,
    ) -> AppResult<MovieListing> {
        let page = query.page();
        let filter = MovieFilter::new(city_id, today)
            .with_languages(query.languages())
            .with_genres(query.genres());

        let mut failures: Vec<AppError> = Vec::new();

        let total = match self.catalog.count(&filter).await {
            Ok(total) => total,
            Err(e) => {
                log_degraded("count", &filter, &e);
                failures.push(e);
                0
            }
        };

        let movies = match self.catalog.list_page(&filter, page, PAGE_SIZE).await {
            Ok(movies) => movies,
            Err(e) => {
                log_degraded("page", &filter, &e);
                failures.push(e);
                Vec::new()
            }
        };

        let facets = match self.catalog.facet_rows(&filter.unfiltered()).await {
            Ok(rows) => Facets::from_rows(&rows),
            Err(e) => {
                log_degraded("facets", &filter, &e);
                failures.push(e);
                Facets::default()
            }
        };

        if failures.len() == 3 && failures.iter().all(AppError::is_connectivity) {
            return Err(AppError::ServiceUnavailable(format!(
                "movie catalog unreachable for city {}",
                city_id
            )));
        }

        tracing::debug!(
            city_id,
            page,
            total,
            returned = movies.len(),
            "movie listing built"
        );

        Ok(MovieListing {
            movies,
            total,
            total_pages: total_pages(total, PAGE_SIZE),
            page,
            per_page: PAGE_SIZE,
            languages: FacetValue::mark(facets.languages, &filter.languages),
            genres: FacetValue::mark(facets.genres, &filter.genres),
        })
    }

    /// Movies showing today in `city_id` whose name contains `term`
    pub async fn search(&self, city_id: i32, term: &str) -> AppResult<Vec<MovieCard>> {
        self.search_on(city_id, term, Utc::now().date_naive()).await
    }

    pub async fn search_on(&self, city_id: i32, term: &str, today: NaiveDate) -> AppResult<Vec<MovieCard>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let filter = MovieFilter::new(city_id, today);
        self.catalog.search(&filter, term, SEARCH_LIMIT).await
    }
}

fn log_degraded(query: &str, filter: &MovieFilter, error: &AppError) {
    tracing::warn!(
        query,
        city_id = filter.city_id,
        languages = ?filter.languages,
        genres = ?filter.genres,
        error = %error,
        "movie listing query failed, rendering section empty"
    );
}
