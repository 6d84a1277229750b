//! Structured errors for the HTTP surface.
//!
//! Every failure renders as `{success: false, message, error?}` where
//! `error` carries the upper-case code from the core error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use techlens_client::MailerError;
use techlens_core::Error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body could not be read as the expected JSON.
    #[error("BAD_REQUEST: {0}")]
    BadRequest(String),

    /// Expected absence, e.g. an unmatched slug.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    #[error(transparent)]
    Core(#[from] Error),

    #[error(transparent)]
    Mailer(#[from] MailerError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String, Option<&'static str>) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), Some("BAD_REQUEST")),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), Some("NOT_FOUND")),
            ApiError::Core(err) => (status_of(err), err.to_string(), Some(err.code())),
            ApiError::Mailer(err) => {
                let core = Error::from(err.clone());
                (status_of(&core), err.user_message(), Some(core.code()))
            }
        }
    }
}

fn status_of(err: &Error) -> StatusCode {
    StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Json(ErrorBody { success: false, message, error })).into_response()
    }
}
