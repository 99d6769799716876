use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Everything a request can fail with. Each variant maps to one status code
/// and a short plain-text body.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid target url {target:?}: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    #[error("failed to read upstream response: {0}")]
    ResponseUnreadable(#[source] reqwest::Error),

    #[error("failed to serialize response: {0}")]
    SerializationFailure(#[from] serde_json::Error),

    #[error("request limit per minute exceeded for {0}")]
    RateLimitExceeded(String),

    #[error("no recorded history for {0}")]
    UserNotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RateLimitExceeded(_) => StatusCode::FORBIDDEN,
            GatewayError::InvalidTarget { .. }
            | GatewayError::UpstreamUnavailable(_)
            | GatewayError::UserNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::ResponseUnreadable(_)
            | GatewayError::SerializationFailure(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::FORBIDDEN => {
                "Forbidden 403.\nDescription: Exceeded request limit per minute."
            }
            StatusCode::NOT_FOUND => "Not found 404",
            _ => "Server error 500",
        };
        (status, body).into_response()
    }
}

// Failures that stop the process before it can serve
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
