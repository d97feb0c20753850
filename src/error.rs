// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Date is not in a valid format: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    RemoteFetch(#[from] RemoteFetchError),

    #[error("Unrecognized activity type: {0}")]
    UnrecognizedActivity(String),

    #[error("Unrecognized segment type: {0}")]
    UnrecognizedSegment(String),

    #[error("Malformed segment: {0}")]
    MalformedSegment(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error means the credential was rejected by Moves.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AppError::RemoteFetch(RemoteFetchError {
                reason: RemoteErrorReason::Unauthorized,
                ..
            })
        )
    }

    /// Whether this error means Moves throttled the request.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            AppError::RemoteFetch(RemoteFetchError {
                reason: RemoteErrorReason::RateLimited,
                ..
            })
        )
    }
}

/// Why a call to the Moves API failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorReason {
    /// HTTP 429
    RateLimited,
    /// HTTP 401, the access token was rejected
    Unauthorized,
    /// Any other non-success HTTP status
    Upstream,
    /// The request never produced a response
    Transport,
    /// A response arrived but did not have the expected shape
    MalformedResponse,
}

impl fmt::Display for RemoteErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RemoteErrorReason::RateLimited => "rate limited",
            RemoteErrorReason::Unauthorized => "unauthorized",
            RemoteErrorReason::Upstream => "upstream error",
            RemoteErrorReason::Transport => "transport error",
            RemoteErrorReason::MalformedResponse => "malformed response",
        };
        f.write_str(s)
    }
}

/// A failed Moves API call, with the cause attached for logging.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Moves API error ({reason}): {detail}")]
pub struct RemoteFetchError {
    pub reason: RemoteErrorReason,
    /// HTTP status, when the failure came with a response.
    pub status: Option<u16>,
    pub detail: String,
}

/// Error payload returned by the Moves API.
#[derive(Debug, Deserialize)]
struct MovesErrorBody {
    error: String,
}

impl RemoteFetchError {
    pub fn new(reason: RemoteErrorReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            status: None,
            detail: detail.into(),
        }
    }

    /// Build an error from a non-success HTTP status and its body.
    ///
    /// The body is decoded as `{"error": "..."}` when possible, otherwise the
    /// raw text is kept.
    pub fn from_status(status: u16, body: &str) -> Self {
        let reason = match status {
            429 => RemoteErrorReason::RateLimited,
            401 => RemoteErrorReason::Unauthorized,
            _ => RemoteErrorReason::Upstream,
        };

        let detail = match serde_json::from_str::<MovesErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
            Err(_) => body.trim().to_string(),
        };

        Self {
            reason,
            status: Some(status),
            detail,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidDate(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_date", Some(msg.clone()))
            }
            AppError::RemoteFetch(err) => {
                tracing::error!(reason = %err.reason, status = ?err.status, detail = %err.detail, "Moves API error");
                let status = match err.reason {
                    RemoteErrorReason::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    RemoteErrorReason::Unauthorized => StatusCode::UNAUTHORIZED,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "moves_error", Some(err.detail.clone()))
            }
            AppError::UnrecognizedActivity(msg)
            | AppError::UnrecognizedSegment(msg)
            | AppError::MalformedSegment(msg) => {
                tracing::error!(error = %self, "Unexpected Moves data");
                (StatusCode::BAD_GATEWAY, "unexpected_data", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
