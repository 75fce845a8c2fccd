use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{models::poll::PollTally, utils::validation::PasswordCheck};

/// Wire envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn failure(error: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Success half of a handler result; the failure half is `AppError`.
#[derive(Debug)]
pub struct ApiSuccess<T> {
    pub status: StatusCode,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiSuccess<T> {
    pub fn ok(data: T) -> Self {
        ApiSuccess {
            status: StatusCode::OK,
            data: Some(data),
            message: None,
        }
    }

    pub fn created(data: T) -> Self {
        ApiSuccess {
            status: StatusCode::CREATED,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiSuccess<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        ApiSuccess {
            status: StatusCode::OK,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            success: true,
            data: self.data,
            message: self.message,
            error: None,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsDTO {
    pub poll_id: String,
    pub title: String,
    pub is_active: bool,
    pub total_votes: u32,
    pub options: Vec<PollOptionResultDTO>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionResultDTO {
    pub option_id: String,
    pub text: String,
    pub votes: u32,
    /// Share of the total, in percent, one decimal place
    pub percentage: f64,
}

impl From<PollTally> for PollResultsDTO {
    fn from(tally: PollTally) -> Self {
        PollResultsDTO {
            poll_id: tally.poll_id,
            title: tally.title,
            is_active: tally.is_active,
            total_votes: tally.total_votes,
            options: tally
                .options
                .into_iter()
                .map(|option| PollOptionResultDTO {
                    option_id: option.option_id,
                    text: option.text,
                    votes: option.votes,
                    percentage: option.percentage,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityDTO {
    pub can_vote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub share_url: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCheckResultDTO {
    pub email_valid: bool,
    pub password: PasswordCheck,
}
