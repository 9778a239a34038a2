use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::story::StoryError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid request body: {0}")]
    JsonError(String),

    #[error("File not found")]
    NotFound,

    #[error("{0}")]
    Story(#[from] StoryError),

    #[error("Generated story is too short or empty")]
    EmptyGeneration,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonError(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::JsonError(_)
            | AppError::Story(_)
            | AppError::EmptyGeneration
            | AppError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
