//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{cities, health, movies, ratings};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ticketbox API",
        version = "0.3.0",
        description = "Movie catalog, listing and ratings REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Cities
        cities::list_cities,
        cities::select_city,
        // Movies
        movies::list_movies,
        movies::search_movies,
        movies::get_movie,
        // Ratings
        ratings::submit_rating,
        ratings::update_rating,
        ratings::delete_rating,
    ),
    components(
        schemas(
            crate::models::city::City,
            crate::models::city::SelectCity,
            crate::models::movie::Movie,
            crate::models::movie::MovieCard,
            crate::models::movie::MovieDetails,
            crate::models::listing::MovieListQuery,
            crate::models::listing::MovieSearchQuery,
            crate::models::listing::MovieListing,
            crate::models::listing::MoviesResponse,
            crate::models::listing::FacetValue,
            crate::models::rating::Rating,
            crate::models::rating::RatingInput,
            crate::models::rating::RatingSummary,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "cities", description = "City selection"),
        (name = "movies", description = "Movie listing, search and details"),
        (name = "ratings", description = "Ratings and reviews")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
