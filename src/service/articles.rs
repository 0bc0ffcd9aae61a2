//! Article listing, lookup, vote updates and the article's comments.

use crate::config::VotePolicy;
use crate::error::AppError;
use crate::models::{Article, Comment, NewComment};
use crate::service::guard::ensure_article_exists;
use crate::service::query::{validate, validate_order, validate_sort_key, ArticleQuery, Outcome, QueryKind};
use crate::store::Store;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Query string of `GET /api/articles`. Unknown parameters are dropped by serde.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArticleListParams {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub struct ArticleService;

impl ArticleService {
    /// Validate the list parameters against live values, then run the built query.
    pub async fn list(store: &dyn Store, params: &ArticleListParams) -> Result<Vec<Article>, AppError> {
        let order = validate_order(params.order.as_deref())?;

        let columns = match params.sort_by {
            Some(_) => store.article_columns().await?,
            None => HashSet::new(),
        };
        let sort = validate_sort_key(params.sort_by.as_deref(), &columns)?;

        let slugs = match params.topic {
            Some(_) => store.topic_slugs().await?,
            None => HashSet::new(),
        };
        let topic = match validate(QueryKind::Filter, params.topic.as_deref(), &slugs)? {
            Outcome::NoFilter => None,
            Outcome::Apply(slug) => Some(slug),
        };

        let query = ArticleQuery { topic, sort, order };
        tracing::debug!(topic = ?query.topic, sort_by = %query.sort, order = query.order.as_sql(), "listing articles");
        store.articles(&query).await
    }

    pub async fn get(store: &dyn Store, raw_id: &str) -> Result<Article, AppError> {
        ensure_article_exists(store, raw_id).await
    }

    /// Add `inc_votes` to the article. A missing `inc_votes` leaves it unchanged.
    pub async fn patch_votes(
        store: &dyn Store,
        policy: VotePolicy,
        raw_id: &str,
        body: &Value,
    ) -> Result<Article, AppError> {
        let article = ensure_article_exists(store, raw_id).await?;
        let inc_votes = parse_inc_votes(body)?;
        if inc_votes == 0 {
            return Ok(article);
        }
        // Not in a transaction with the guard: a concurrent delete lands here as None.
        store
            .increment_votes(article.article_id, inc_votes, policy)
            .await?
            .ok_or_else(|| AppError::not_found("Article Not Found"))
    }

    pub async fn comments(store: &dyn Store, raw_id: &str) -> Result<Vec<Comment>, AppError> {
        let article = ensure_article_exists(store, raw_id).await?;
        store.comments_for_article(article.article_id).await
    }

    /// Insert a comment from `{ username, body }`; any other keys are ignored.
    pub async fn add_comment(store: &dyn Store, raw_id: &str, body: &Value) -> Result<Comment, AppError> {
        let username = body.get("username").and_then(Value::as_str);
        let text = body.get("body").and_then(Value::as_str);
        let (Some(username), Some(text)) = (username, text) else {
            return Err(AppError::validation("not enough data given"));
        };
        let article = ensure_article_exists(store, raw_id).await?;
        let comment = NewComment {
            article_id: article.article_id,
            author: username.to_string(),
            body: text.to_string(),
        };
        let created = store.insert_comment(&comment).await?;
        tracing::info!(comment_id = created.comment_id, article_id = created.article_id, "comment created");
        Ok(created)
    }
}

/// JSON has one number type: `1`, `1.0` and `1e1` are all integers here.
fn parse_inc_votes(body: &Value) -> Result<i32, AppError> {
    match body.get("inc_votes") {
        None => Ok(0),
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().and_then(whole_in_i32_range))
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| AppError::validation("inc_votes must be an integer")),
    }
}

fn whole_in_i32_range(f: f64) -> Option<i64> {
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&f);
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}
