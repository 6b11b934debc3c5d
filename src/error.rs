use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::mapper::MappingError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            err @ (AppError::Database(_) | AppError::Mapping(_)) => {
                error!("request failed: {}", err);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(ErrorResponse {
                    error: status.to_string(),
                    message: err.to_string(),
                });

                (status, body).into_response()
            }
        }
    }
}
