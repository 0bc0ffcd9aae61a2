//! Comment handlers: list all, delete by id.

use crate::error::AppError;
use crate::response::success_ok;
use crate::service::CommentService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let comments = CommentService::list(state.store.as_ref()).await?;
    Ok(success_ok("comments", comments))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    CommentService::remove(state.store.as_ref(), &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
