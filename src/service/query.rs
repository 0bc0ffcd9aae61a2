//! Validation of list query values against the live set of allowed values.
//!
//! Filters and sort keys are checked against what the store currently holds
//! (topic slugs, article columns). Only validated values ever reach the SQL
//! builder; `SortKey` in particular is interpolated as an identifier, so it
//! can only be constructed here.

use crate::error::AppError;
use std::collections::HashSet;
use std::fmt;

/// Synthetic sort key backed by the aggregated comment count.
pub const COMMENT_COUNT: &str = "comment_count";
pub const DEFAULT_SORT_COLUMN: &str = "created_at";

/// What kind of query value is being checked. Unknown filter values are a
/// missing resource (404); unknown sort keys are a malformed request (400).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    Filter,
    SortKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoFilter,
    Apply(String),
}

pub fn validate(kind: QueryKind, requested: Option<&str>, valid: &HashSet<String>) -> Result<Outcome, AppError> {
    let Some(value) = requested else {
        return Ok(Outcome::NoFilter);
    };
    if value.is_empty() {
        return Err(AppError::validation("no query value given"));
    }
    if valid.contains(value) {
        return Ok(Outcome::Apply(value.to_string()));
    }
    match kind {
        QueryKind::Filter => Err(AppError::not_found("no resources found")),
        QueryKind::SortKey => Err(AppError::validation("invalid query given")),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub fn validate_order(requested: Option<&str>) -> Result<SortOrder, AppError> {
    match requested {
        None => Ok(SortOrder::default()),
        Some("") => Err(AppError::validation("no query value given")),
        Some(s) if s.eq_ignore_ascii_case("asc") => Ok(SortOrder::Asc),
        Some(s) if s.eq_ignore_ascii_case("desc") => Ok(SortOrder::Desc),
        Some(_) => Err(AppError::validation(r#"must receive "desc" or "asc""#)),
    }
}

/// What a validated sort key orders by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortTarget {
    Column(String),
    CommentCount,
}

/// A sort key that has passed the allow-list check. The field is private so
/// code outside this crate cannot forge one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey(SortTarget);

impl SortKey {
    pub fn created_at() -> Self {
        SortKey(SortTarget::Column(DEFAULT_SORT_COLUMN.to_string()))
    }

    pub fn target(&self) -> &SortTarget {
        &self.0
    }

    fn name(&self) -> &str {
        match &self.0 {
            SortTarget::Column(c) => c,
            SortTarget::CommentCount => COMMENT_COUNT,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::created_at()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `sort_by`: absent -> created_at; otherwise must be an article column or `comment_count`.
pub fn validate_sort_key(requested: Option<&str>, columns: &HashSet<String>) -> Result<SortKey, AppError> {
    if requested == Some(COMMENT_COUNT) {
        return Ok(SortKey(SortTarget::CommentCount));
    }
    match validate(QueryKind::SortKey, requested, columns)? {
        Outcome::NoFilter => Ok(SortKey::default()),
        Outcome::Apply(col) => Ok(SortKey(SortTarget::Column(col))),
    }
}

/// Fully validated article listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub topic: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
}
