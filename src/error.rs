use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::dtos::responses::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    // Input Errors
    #[error("{0}")]
    Validation(String),
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    // Authentication & Session Errors
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Invalid session state: {0}")]
    InvalidSessionState(#[from] tower_sessions::session::Error),

    // Poll Errors
    #[error(transparent)]
    Poll(#[from] PollsError),
    /// Voting failures are reported as server errors, whatever the cause.
    #[error(transparent)]
    VoteRejected(PollsError),
}

#[derive(Error, Debug, PartialEq)]
pub enum PollsError {
    #[error("Poll not found")]
    PollNotFound,

    #[error("Poll is closed")]
    PollClosed,
}

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Poll(PollsError::PollNotFound) => StatusCode::NOT_FOUND,
            AppError::Poll(PollsError::PollClosed) => StatusCode::FORBIDDEN,
            AppError::VoteRejected(_) | AppError::InvalidSessionState(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut error_message = self.to_string();
        if error_message.trim().is_empty() {
            error_message = String::from("Request failed");
        }

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, error_message);
        } else {
            warn!("Request rejected with {}: {}", status, error_message);
        }

        let body: ApiResponse<()> = ApiResponse::failure(error_message);
        (status, Json(body)).into_response()
    }
}
