use common::http_client::FetchError;
use thiserror::Error;

pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";

/// Why a dashboard query did not produce data.
///
/// `Display` is the text shown to the user.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The gateway answered with an error status and message
    #[error("{message}")]
    Gateway { status: u16, message: String },

    #[error("{}", SOMETHING_WENT_WRONG)]
    Network(#[source] FetchError),

    #[error("{}", SOMETHING_WENT_WRONG)]
    Decode(#[source] FetchError),
}

impl DashboardError {
    /// Classify a failed gateway call, using `fallback` when the gateway
    /// gave no message of its own
    pub fn from_fetch(err: FetchError, fallback: &str) -> Self {
        match err {
            FetchError::Status { status, message } => Self::Gateway {
                status,
                message: message.unwrap_or_else(|| fallback.to_string()),
            },
            FetchError::Decode(_) => Self::Decode(err),
            FetchError::Timeout | FetchError::Network(_) => Self::Network(err),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_message_is_shown_verbatim() {
        let err = DashboardError::from_fetch(
            FetchError::Status {
                status: 404,
                message: Some("city not found".to_string()),
            },
            "Failed to fetch weather data",
        );
        assert_eq!(err.to_string(), "city not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn missing_message_uses_fallback() {
        let err = DashboardError::from_fetch(
            FetchError::Status {
                status: 502,
                message: None,
            },
            "Failed to fetch forecast data",
        );
        assert_eq!(err.to_string(), "Failed to fetch forecast data");
    }

    #[test]
    fn transport_problems_get_generic_text() {
        let err = DashboardError::from_fetch(FetchError::Timeout, "unused");
        assert_eq!(err.to_string(), SOMETHING_WENT_WRONG);
        assert_eq!(err.status(), None);
    }
}
