//! Logging initialisation for fakework
//!
//! Builds a `tracing-subscriber` from [`LoggingConfig`], with an optional
//! level override from the command line and `RUST_LOG` as the fallback.

pub mod init;

pub use fakework_config::{LogFormat, LogLevel, LoggingConfig};
pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
