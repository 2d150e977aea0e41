//! Endpoint error types
//!
//! Client input never produces an error; these cover the server lifecycle
//! and the blocking worker that runs the simulation.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result type for endpoint operations
pub type EndpointResult<T> = Result<T, EndpointError>;

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Work task failed: {0}")]
    WorkerJoin(#[from] tokio::task::JoinError),
}

impl EndpointError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);

        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Internal server error\n",
        )
            .into_response()
    }
}
