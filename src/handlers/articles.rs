//! Article handlers: list, read, vote, and the article's comments.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{success_created, success_ok};
use crate::service::{ArticleListParams, ArticleService};
use crate::state::AppState;
use axum::extract::{rejection::QueryRejection, Path, Query, State};

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ArticleListParams>, QueryRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Query(params) = query.map_err(|_| AppError::validation("invalid query given"))?;
    let articles = ArticleService::list(state.store.as_ref(), &params).await?;
    Ok(success_ok("articles", articles))
}

pub async fn read(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let article = ArticleService::get(state.store.as_ref(), &article_id).await?;
    Ok(success_ok("article", article))
}

pub async fn update_votes(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let article = ArticleService::patch_votes(state.store.as_ref(), state.vote_policy, &article_id, &body).await?;
    Ok(success_ok("article", article))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let comments = ArticleService::comments(state.store.as_ref(), &article_id).await?;
    Ok(success_ok("comments", comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let comment = ArticleService::add_comment(state.store.as_ref(), &article_id, &body).await?;
    Ok(success_created("comment", comment))
}
