//! `GET /fake_work`

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderName, HeaderValue},
    response::IntoResponse,
};
use fakework_config::{EndpointConfig, WorkDefaults};
use tracing::debug;

use crate::errors::EndpointResult;
use crate::params::WorkParams;
use crate::work::simulate;

/// Header carrying the handler's wall-clock time in seconds
pub const RUNTIME_HEADER: &str = "x-runtime";

/// Immutable per-server settings shared by all requests
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub defaults: WorkDefaults,
    pub max_response_chars: Option<u64>,
}

impl AppState {
    pub fn from_config(config: &EndpointConfig) -> Self {
        Self {
            defaults: config.defaults,
            max_response_chars: config.max_response_chars,
        }
    }

    pub fn resolve(&self, query: Option<&str>) -> WorkParams {
        WorkParams::from_query(query, &self.defaults, self.max_response_chars)
    }
}

/// Simulate the requested work and answer with a plain-text body.
///
/// The CPU spin and the blocking wait run on tokio's blocking pool so they
/// never stall the async workers serving other requests.
pub async fn fake_work_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> EndpointResult<impl IntoResponse> {
    let params = state.resolve(query.as_deref());

    let outcome = tokio::task::spawn_blocking(move || simulate(&params)).await?;

    debug!(
        cpu_ms = params.cpu_ms,
        iowait_ms = params.iowait_ms,
        response_chars = params.response_chars,
        filler_us = outcome.filler_elapsed.as_micros() as u64,
        cpu_us = outcome.cpu_elapsed.as_micros() as u64,
        iowait_us = outcome.iowait_elapsed.as_micros() as u64,
        total_us = outcome.total_elapsed.as_micros() as u64,
        "Fake work completed"
    );

    let runtime = format!("{:.6}", outcome.total_elapsed.as_secs_f64());
    let runtime = HeaderValue::from_str(&runtime).unwrap_or(HeaderValue::from_static("0"));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (HeaderName::from_static(RUNTIME_HEADER), runtime),
        ],
        outcome.body,
    ))
}
