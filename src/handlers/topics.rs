//! GET /api/topics.

use crate::error::AppError;
use crate::response::success_ok;
use crate::state::AppState;
use axum::extract::State;

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let topics = state.store.topics().await?;
    Ok(success_ok("topics", topics))
}
