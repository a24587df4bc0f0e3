//! City models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// City a user browses the catalog in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct City {
    pub id: i32,
    pub name: String,
}

/// Select the session city
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectCity {
    pub city_id: i32,
}
