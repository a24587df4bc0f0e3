//! API handlers for Ticketbox REST endpoints

pub mod cities;
pub mod health;
pub mod movies;
pub mod openapi;
pub mod ratings;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    models::SessionClaims,
    AppState,
};

/// Cookie holding the city chosen by the visitor
pub const CITY_COOKIE: &str = "city_id";

/// Who is asking and which city they browse.
///
/// The city comes from the `city_id` cookie, the user from an optional bearer
/// token. Both may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub city_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl RequestContext {
    /// Signed-in user ID, or an authentication error
    pub fn require_user(&self) -> AppResult<i32> {
        self.user_id
            .ok_or_else(|| AppError::Authentication("Sign in required".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let city_id = jar
            .get(CITY_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i32>().ok());

        let user_id = match parts.headers.get(AUTHORIZATION) {
            None => None,
            Some(value) => {
                let header = value
                    .to_str()
                    .map_err(|_| AppError::Authentication("Invalid authorization header".to_string()))?;
                let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Authentication("Invalid authorization header format".to_string())
                })?;
                let claims = SessionClaims::from_token(token, &state.config.auth.jwt_secret)
                    .map_err(|e| AppError::Authentication(e.to_string()))?;
                Some(claims.user_id)
            }
        };

        Ok(RequestContext { city_id, user_id })
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Cities and session
        .route("/cities", get(cities::list_cities))
        .route("/session/city", put(cities::select_city))
        // Movies
        .route("/movies", get(movies::list_movies))
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/:id", get(movies::get_movie))
        .route("/movies/:id/ratings", post(ratings::submit_rating))
        // Ratings
        .route(
            "/ratings/:id",
            put(ratings::update_rating).delete(ratings::delete_rating),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
