use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

pub const CITY_REQUIRED: &str = "City parameter is required";

/// Errors surfaced by the proxy endpoints
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("API key not configured")]
    Configuration,

    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The provider could not be reached; `message` is already the generic text
    /// handed to the caller, the cause is only logged.
    #[error("{message}")]
    Transport { message: String },
}

impl GatewayError {
    pub fn city_required() -> Self {
        Self::Validation(CITY_REQUIRED.to_string())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
