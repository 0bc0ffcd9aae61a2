//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Every failure a request can end in. The variant decides the status code;
/// the message is what the client sees under `msg`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("400 Bad Request - {0}")]
    Validation(String),
    #[error("404 {0}")]
    NotFound(String),
    #[error("413 request body too large")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Server-side failures never leak their cause.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Db(_) | AppError::Internal(_) => "500 Bad Server".to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            msg: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_bad_request_with_prefix() {
        let err = AppError::validation("Invalid ID");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "400 Bad Request - Invalid ID");
    }

    #[test]
    fn not_found_keeps_reason() {
        let err = AppError::not_found("Article Not Found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "404 Article Not Found");
    }

    #[test]
    fn oversized_body_is_413() {
        let err = AppError::PayloadTooLarge;
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.client_message(), "413 request body too large");
    }

    #[test]
    fn server_errors_hide_details() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "500 Bad Server");
        let err = AppError::Internal("lock poisoned".into());
        assert_eq!(err.client_message(), "500 Bad Server");
    }
}
