use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::JudgmentError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    NoActiveGame,
    InvalidPlayerCount(JudgmentError),
    InvalidPlayerName(JudgmentError),
    PlayerCountMismatch(JudgmentError),
    PhaseViolation(JudgmentError),
    InvalidRequest(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NoActiveGame => (
                StatusCode::NOT_FOUND,
                "NO_ACTIVE_GAME",
                JudgmentError::NoActiveSession.to_string(),
            ),
            ApiError::InvalidPlayerCount(err) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PLAYER_COUNT",
                err.to_string(),
            ),
            ApiError::InvalidPlayerName(err) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PLAYER_NAME",
                err.to_string(),
            ),
            ApiError::PlayerCountMismatch(err) => (
                StatusCode::BAD_REQUEST,
                "PLAYER_COUNT_MISMATCH",
                err.to_string(),
            ),
            ApiError::PhaseViolation(err) => {
                (StatusCode::BAD_REQUEST, "PHASE_VIOLATION", err.to_string())
            }
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JudgmentError> for ApiError {
    fn from(err: JudgmentError) -> Self {
        match &err {
            JudgmentError::InvalidPlayerCount(_) => ApiError::InvalidPlayerCount(err),
            JudgmentError::InvalidPlayerName(_) => ApiError::InvalidPlayerName(err),
            JudgmentError::PlayerCountMismatch { .. } => ApiError::PlayerCountMismatch(err),
            JudgmentError::PhaseViolation { .. } => ApiError::PhaseViolation(err),
            JudgmentError::NoActiveSession => ApiError::NoActiveGame,
        }
    }
}
