//! HTTP mapping for errors that reach a caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use logo_core::LogoError;
use serde::Serialize;

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// User-facing message.
    pub error: String,
}

/// An error rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub LogoError);

impl ApiError {
    /// HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            LogoError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LogoError::Configuration(_)
            | LogoError::TerminalUpstream(_)
            | LogoError::DataUri(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LogoError> for ApiError {
    fn from(err: LogoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
