use anyhow::Result;
use fakework_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Resolve the filter: explicit override, then config, then `RUST_LOG`, then `info`
pub fn build_env_filter(config: &LoggingConfig, level_override: Option<&str>) -> EnvFilter {
    let requested = match level_override {
        Some(level) => level.to_string(),
        None => config.filter_string(),
    };

    EnvFilter::try_new(&requested)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let env_filter = build_env_filter(config, level_override);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_thread_ids(config.include_thread_ids);

    // Use try_init to avoid panic if global subscriber already set
    let result = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

/// Initialize simple tracing for basic console output
pub fn init_simple_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt().with_env_filter(env_filter).try_init().is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}
