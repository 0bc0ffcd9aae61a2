//! GET /api/users.

use crate::error::AppError;
use crate::response::success_ok;
use crate::state::AppState;
use axum::extract::State;

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let users = state.store.users().await?;
    Ok(success_ok("users", users))
}
