//! Movie listing request and response types

use std::{collections::BTreeSet, num::IntErrorKind};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::movie::{split_genres, MovieCard};

/// Movies shown per listing page
pub const PAGE_SIZE: i64 = 12;

/// Query parameters for the movie listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MovieListQuery {
    /// Comma separated languages, e.g. `English,Hindi`
    pub language: Option<String>,
    /// Comma separated genres, e.g. `Action,Drama`
    pub genre: Option<String>,
    /// Page number (1-based). Anything unparsable falls back to 1.
    pub page: Option<String>,
}

impl MovieListQuery {
    pub fn languages(&self) -> Vec<String> {
        parse_multi_value(self.language.as_deref())
    }

    pub fn genres(&self) -> Vec<String> {
        parse_multi_value(self.genre.as_deref())
    }

    /// Requested page, clamped to at least 1. Numbers too large for i64
    /// saturate so they still land past the last page.
    pub fn page(&self) -> i64 {
        let Some(raw) = self.page.as_deref() else {
            return 1;
        };
        match raw.trim().parse::<i64>() {
            Ok(page) => page.max(1),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(_) => 1,
        }
    }
}

/// Query parameters for the name search
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MovieSearchQuery {
    /// Part of the movie name
    pub q: Option<String>,
}

/// Split a comma separated query value, dropping empty entries and repeats.
pub fn parse_multi_value(raw: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in raw.unwrap_or_default().split(',').map(str::trim) {
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

/// Number of pages needed for `total` rows
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// Raw `(language, genre)` pair read by the facet query
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FacetRow {
    pub language: Option<String>,
    pub genre: Option<String>,
}

/// Distinct language and genre values of the active catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub languages: Vec<String>,
    pub genres: Vec<String>,
}

impl Facets {
    pub fn from_rows(rows: &[FacetRow]) -> Self {
        let mut languages = BTreeSet::new();
        let mut genres = BTreeSet::new();

        for row in rows {
            if let Some(lang) = row.language.as_deref().map(str::trim) {
                if !lang.is_empty() {
                    languages.insert(lang.to_string());
                }
            }
            if let Some(genre) = row.genre.as_deref() {
                genres.extend(split_genres(genre));
            }
        }

        Self {
            languages: languages.into_iter().collect(),
            genres: genres.into_iter().collect(),
        }
    }
}

/// One toggle in the filter sidebar
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FacetValue {
    pub value: String,
    pub selected: bool,
}

impl FacetValue {
    pub fn mark(values: Vec<String>, selected: &[String]) -> Vec<FacetValue> {
        values
            .into_iter()
            .map(|value| {
                let selected = selected.contains(&value);
                FacetValue { value, selected }
            })
            .collect()
    }
}

/// Listing page handed to the renderer
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovieListing {
    pub movies: Vec<MovieCard>,
    /// Movies matching the filters across all pages
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub per_page: i64,
    pub languages: Vec<FacetValue>,
    pub genres: Vec<FacetValue>,
}

/// Response of `GET /movies`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoviesResponse {
    /// Set when no city was chosen yet; the listing is then absent
    pub city_required: bool,
    pub listing: Option<MovieListing>,
}
