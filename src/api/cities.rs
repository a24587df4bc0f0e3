//! City endpoints

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::CITY_COOKIE;
use crate::{
    error::AppResult,
    models::city::{City, SelectCity},
    AppState,
};

/// List active cities
#[utoipa::path(
    get,
    path = "/cities",
    tag = "cities",
    responses(
        (status = 200, description = "Active cities", body = Vec<City>)
    )
)]
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<City>>> {
    let cities = state.services.cities.list().await?;
    Ok(Json(cities))
}

/// Choose the city to browse; remembered in the `city_id` cookie
#[utoipa::path(
    put,
    path = "/session/city",
    tag = "cities",
    request_body = SelectCity,
    responses(
        (status = 200, description = "City selected", body = City),
        (status = 404, description = "Unknown or inactive city", body = crate::error::ErrorResponse)
    )
)]
pub async fn select_city(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(data): Json<SelectCity>,
) -> AppResult<(CookieJar, Json<City>)> {
    let city = state.services.cities.select(data.city_id).await?;

    let cookie = Cookie::build((CITY_COOKIE, city.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(city)))
}
