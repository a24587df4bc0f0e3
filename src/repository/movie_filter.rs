//! SQL construction for the movie catalog.
//!
//! Every listing statement (page, count, facets, name search) is produced from
//! one [`SqlPredicate`], so the page and its total always share the same joins
//! and the same WHERE clause. User supplied values only ever travel as bind
//! values behind positional `$n` placeholders; the placeholder numbers depend
//! on position alone, never on the values.

use chrono::NaiveDate;

/// Active flag value of a live catalog row
pub const ACTIVE: &str = "yes";

/// Joins shared by every catalog statement
const CATALOG_FROM: &str = "FROM events e \
     JOIN schedules s ON s.event_id = e.id \
     JOIN venues v ON v.id = s.venue_id";

/// Columns of a [`MovieCard`](crate::models::MovieCard)
const CARD_COLUMNS: &str = "e.id, e.name, e.poster, e.language, e.genre, e.created_at";

/// Value bound to a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    BigInt(i64),
    Text(String),
    Date(NaiveDate),
}

/// Ready-to-run SQL text with its bind values in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<SqlValue>,
}

/// Conjunction of conditions plus the values they bind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlPredicate {
    conditions: Vec<String>,
    binds: Vec<SqlValue>,
}

impl SqlPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value and return the placeholder that refers to it
    fn bind(&mut self, value: SqlValue) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    fn and(&mut self, condition: impl Into<String>) {
        self.conditions.push(condition.into());
    }

    /// `(column = $a OR column = $b ...)`; no-op for an empty list
    fn and_any_equal(&mut self, column: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        let alternatives: Vec<String> = values
            .iter()
            .map(|v| format!("{} = {}", column, self.bind(SqlValue::Text(v.clone()))))
            .collect();
        self.and(format!("({})", alternatives.join(" OR ")));
    }

    /// `(column LIKE $a OR column LIKE $b ...)` with `%` around each value
    fn and_any_contains(&mut self, column: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        let alternatives: Vec<String> = values
            .iter()
            .map(|v| {
                let pattern = format!("%{}%", escape_like(v));
                format!("{} LIKE {}", column, self.bind(SqlValue::Text(pattern)))
            })
            .collect();
        self.and(format!("({})", alternatives.join(" OR ")));
    }

    /// Case-insensitive substring match on the movie name
    pub fn and_name_contains(mut self, term: &str) -> Self {
        let pattern = format!("%{}%", escape_like(term));
        let placeholder = self.bind(SqlValue::Text(pattern));
        self.and(format!("e.name ILIKE {}", placeholder));
        self
    }

    pub fn binds(&self) -> &[SqlValue] {
        &self.binds
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        }
    }

    /// One page of distinct movies, newest first
    pub fn select_page(&self, page: i64, per_page: i64) -> Statement {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let mut binds = self.binds.clone();
        binds.push(SqlValue::BigInt(per_page));
        let limit = binds.len();
        binds.push(SqlValue::BigInt((page - 1).saturating_mul(per_page)));
        let offset = binds.len();

        Statement {
            sql: format!(
                "SELECT {} {} WHERE {} GROUP BY e.id \
                 ORDER BY e.created_at DESC, e.id DESC LIMIT ${} OFFSET ${}",
                CARD_COLUMNS,
                CATALOG_FROM,
                self.where_clause(),
                limit,
                offset
            ),
            binds,
        }
    }

    /// Number of distinct movies matching the predicate
    pub fn select_count(&self) -> Statement {
        Statement {
            sql: format!(
                "SELECT COUNT(DISTINCT e.id) {} WHERE {}",
                CATALOG_FROM,
                self.where_clause()
            ),
            binds: self.binds.clone(),
        }
    }

    /// Distinct raw (language, genre) pairs for building facet lists
    pub fn select_facets(&self) -> Statement {
        Statement {
            sql: format!(
                "SELECT DISTINCT e.language, e.genre {} WHERE {}",
                CATALOG_FROM,
                self.where_clause()
            ),
            binds: self.binds.clone(),
        }
    }
}

/// Catalog selection of one listing request
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFilter {
    pub city_id: i32,
    pub languages: Vec<String>,
    pub genres: Vec<String>,
    /// Date the showing window is checked against
    pub today: NaiveDate,
}

impl MovieFilter {
    pub fn new(city_id: i32, today: NaiveDate) -> Self {
        Self {
            city_id,
            languages: Vec::new(),
            genres: Vec::new(),
            today,
        }
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    /// Same city and date, without language or genre narrowing
    pub fn unfiltered(&self) -> Self {
        Self::new(self.city_id, self.today)
    }

    /// Eligibility of a movie in the city today
    pub fn base_predicate(&self) -> SqlPredicate {
        let mut p = SqlPredicate::new();
        p.and("e.event_type ILIKE '%movie%'");
        p.and(format!("e.active = '{}'", ACTIVE));
        p.and(format!("s.active = '{}'", ACTIVE));
        p.and(format!("v.active = '{}'", ACTIVE));
        let city = p.bind(SqlValue::Int(self.city_id));
        p.and(format!("v.city_id = {}", city));
        let today = p.bind(SqlValue::Date(self.today));
        p.and(format!("{} BETWEEN e.start_date AND e.end_date", today));
        p
    }

    /// Eligibility plus the selected languages and genres
    pub fn predicate(&self) -> SqlPredicate {
        let mut p = self.base_predicate();
        p.and_any_equal("e.language", &self.languages);
        p.and_any_contains("e.genre", &self.genres);
        p
    }
}

/// Escape LIKE metacharacters so user text matches literally
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
