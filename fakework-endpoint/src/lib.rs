//! # fakework endpoint
//!
//! An HTTP endpoint that stands in for a real workload during capacity
//! testing. Each `GET /fake_work` request burns a requested amount of CPU
//! time, blocks for a requested amount of wall-clock time and returns a
//! plain-text body carrying a filler payload of a requested size.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fakework_config::EndpointConfig;
//! use fakework_endpoint::Server;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fakework_endpoint::EndpointError> {
//! Server::new(EndpointConfig::default()).start().await
//! # }
//! ```

pub mod app;
pub mod errors;
pub mod handler;
pub mod params;
pub mod server;
pub mod work;

pub use app::create_app;
pub use errors::{EndpointError, EndpointResult};
pub use handler::{fake_work_handler, AppState};
pub use params::{parse_int_lenient, WorkParams, MAX_FILLER_CHARS};
pub use server::Server;
pub use work::{build_filler, burn_cpu_since, render_body, simulate, WorkOutcome, FILLER_CHAR};
