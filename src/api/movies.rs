//! Movie endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::RequestContext;
use crate::{
    error::{AppError, AppResult},
    models::{
        listing::{MovieListQuery, MovieSearchQuery, MoviesResponse},
        MovieCard, MovieDetails,
    },
    AppState,
};

/// Movies showing in the selected city, filtered and paginated
#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    params(MovieListQuery),
    responses(
        (status = 200, description = "Listing page, or `city_required` when no city is selected", body = MoviesResponse),
        (status = 503, description = "Catalog unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<MovieListQuery>,
) -> AppResult<Json<MoviesResponse>> {
    let Some(city_id) = ctx.city_id else {
        return Ok(Json(MoviesResponse {
            city_required: true,
            listing: None,
        }));
    };

    let listing = state.services.listing.list_movies(city_id, &query).await?;
    Ok(Json(MoviesResponse {
        city_required: false,
        listing: Some(listing),
    }))
}

/// Search movies of the selected city by name
#[utoipa::path(
    get,
    path = "/movies/search",
    tag = "movies",
    params(MovieSearchQuery),
    responses(
        (status = 200, description = "Matching movies", body = Vec<MovieCard>),
        (status = 400, description = "No city selected", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_movies(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<MovieSearchQuery>,
) -> AppResult<Json<Vec<MovieCard>>> {
    let city_id = ctx
        .city_id
        .ok_or_else(|| AppError::BadRequest("Select a city first".to_string()))?;
    let movies = state
        .services
        .listing
        .search(city_id, query.q.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(movies))
}

/// Movie details with ratings and reviews
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie details", body = MovieDetails),
        (status = 404, description = "Movie not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieDetails>> {
    let details = state.services.movies.details(id).await?;
    Ok(Json(details))
}
