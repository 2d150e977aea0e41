//! Router construction

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler::{fake_work_handler, AppState};

/// Build the endpoint router
pub fn create_app(state: AppState, enable_tracing: bool) -> Router {
    let app = Router::new()
        .route("/fake_work", get(fake_work_handler))
        .with_state(state);

    if enable_tracing {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}
