//! GET /api: the endpoint catalogue shipped with the binary.

use crate::error::AppError;
use crate::response::success_ok;
use serde_json::Value;

const ENDPOINTS_JSON: &str = include_str!("../../endpoints.json");

pub async fn describe() -> Result<impl axum::response::IntoResponse, AppError> {
    let endpoints: Value = serde_json::from_str(ENDPOINTS_JSON)
        .map_err(|e| AppError::Internal(format!("endpoints.json: {}", e)))?;
    Ok(success_ok("endpoints", endpoints))
}
