//! Rating endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::RequestContext;
use crate::{
    error::AppResult,
    models::{Rating, RatingInput},
    AppState,
};

/// Rate a movie
#[utoipa::path(
    post,
    path = "/movies/{id}/ratings",
    tag = "ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = RatingInput,
    responses(
        (status = 201, description = "Rating created", body = Rating),
        (status = 409, description = "Movie already rated by this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    Json(data): Json<RatingInput>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let user_id = ctx.require_user()?;
    let rating = state.services.ratings.submit(user_id, id, &data).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// Edit own rating
#[utoipa::path(
    put,
    path = "/ratings/{id}",
    tag = "ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rating ID")),
    request_body = RatingInput,
    responses(
        (status = 200, description = "Rating updated", body = Rating),
        (status = 403, description = "Not the author", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_rating(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    Json(data): Json<RatingInput>,
) -> AppResult<Json<Rating>> {
    let user_id = ctx.require_user()?;
    let rating = state.services.ratings.update(user_id, id, &data).await?;
    Ok(Json(rating))
}

/// Remove own rating
#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    tag = "ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rating ID")),
    responses(
        (status = 204, description = "Rating removed"),
        (status = 403, description = "Not the author", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let user_id = ctx.require_user()?;
    state.services.ratings.delete(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
