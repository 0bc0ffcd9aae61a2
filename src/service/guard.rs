//! Existence checks run before anything reads or writes rows that depend on a parent.

use crate::error::AppError;
use crate::models::Article;
use crate::store::Store;

pub fn parse_article_id(raw: &str) -> Result<i32, AppError> {
    raw.parse().map_err(|_| AppError::validation("Invalid ID"))
}

pub fn parse_comment_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation("invalid comment id given"))
}

/// Returns the full article (with comment count) so callers need no second read.
pub async fn ensure_article_exists(store: &dyn Store, raw_id: &str) -> Result<Article, AppError> {
    let article_id = parse_article_id(raw_id)?;
    store
        .article_by_id(article_id)
        .await?
        .ok_or_else(|| AppError::not_found("Article Not Found"))
}
