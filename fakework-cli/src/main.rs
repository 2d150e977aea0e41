use anyhow::{Context, Result};
use clap::Parser;
use fakework_config::validation::Validatable;
use fakework_config::{ConfigLoader, EndpointConfig, FakeworkConfig, SiegeConfig};
use fakework_endpoint::Server;
use fakework_siege::{run_siege, ProcessCommandRunner};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

mod cli;
use cli::{Cli, Commands, ConfigCommands};

/// Load configuration from file or environment
fn load_config(config_path: Option<&PathBuf>) -> Result<FakeworkConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => loader
            .from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path)),
        None => loader
            .from_env()
            .context("Failed to load configuration from environment"),
    }
}

fn apply_serve_overrides(
    config: &mut EndpointConfig,
    bind: Option<&String>,
    port: Option<u16>,
    max_response_chars: Option<u64>,
) -> Result<()> {
    if let Some(bind) = bind {
        config.bind_address = bind.clone();
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(cap) = max_response_chars {
        config.max_response_chars = Some(cap);
    }
    config.validate().context("Invalid endpoint configuration")?;
    Ok(())
}

struct SiegeOverrides<'a> {
    app: Option<&'a String>,
    base_url: Option<&'a String>,
    query: Option<&'a String>,
    log_file: Option<&'a PathBuf>,
    max_concurrency: Option<u32>,
    variants: Option<&'a Vec<String>>,
}

fn apply_siege_overrides(config: &mut SiegeConfig, overrides: SiegeOverrides<'_>) {
    if let Some(app) = overrides.app {
        config.app = app.clone();
    }
    if let Some(base_url) = overrides.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(query) = overrides.query {
        config.query = query.clone();
    }
    if let Some(log_file) = overrides.log_file {
        config.log_file = log_file.clone();
    }
    if let Some(max_concurrency) = overrides.max_concurrency {
        config.max_concurrency = max_concurrency;
    }
    if let Some(variants) = overrides.variants {
        config.variants = variants
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
    }
}

async fn serve_command(config: EndpointConfig) -> Result<()> {
    info!("Starting fake-work endpoint");
    Server::new(config).start().await?;
    Ok(())
}

async fn siege_command(config: SiegeConfig) -> Result<()> {
    let runner = ProcessCommandRunner::new();
    let report = run_siege(&config, &runner).await.inspect_err(|e| {
        error!("Siege aborted: {}", e);
    })?;

    println!(
        "Sieged {} variant(s): {} runs, {} failed. Results in {}",
        report.deploys,
        report.siege_runs,
        report.failed_runs,
        config.log_file.display()
    );
    Ok(())
}

/// Handle configuration validation
fn handle_config_validate(config_file: &PathBuf) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);

    if !config_file.exists() {
        return Err(anyhow::anyhow!(
            "Configuration file not found: {:?}",
            config_file
        ));
    }

    match load_config(Some(config_file)) {
        Ok(config) => {
            println!("Configuration file is valid");
            if let Err(e) = config.siege.validate() {
                println!("Note: siege section is not runnable yet: {}", e);
            }
            Ok(())
        }
        Err(e) => {
            println!("Configuration validation failed: {:#}", e);
            Err(e)
        }
    }
}

/// Handle configuration generation
fn handle_config_generate(output: &Path, force: bool) -> Result<()> {
    info!("Generating sample configuration at: {:?}", output);

    if output.exists() && !force {
        return Err(anyhow::anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
    }

    fs::write(output, FakeworkConfig::generate_sample())
        .with_context(|| format!("Failed to write {:?}", output))?;

    println!("Configuration written to {:?}", output);
    Ok(())
}

fn render_config(config: &FakeworkConfig, format: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::to_string(config).context("Failed to serialize to YAML"),
        "json" => serde_json::to_string_pretty(config).context("Failed to serialize to JSON"),
        _ => Err(anyhow::anyhow!(
            "Unknown output format: {}. Valid formats: yaml, json",
            format
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;

    fakework_logging::init_logging_from_config(&config.logging, cli.log_level.as_deref())?;
    debug!("Configuration loaded");

    match &cli.command {
        Commands::Serve {
            bind,
            port,
            max_response_chars,
        } => {
            apply_serve_overrides(&mut config.endpoint, bind.as_ref(), *port, *max_response_chars)?;
            serve_command(config.endpoint).await
        }
        Commands::Siege {
            app,
            base_url,
            query,
            log_file,
            max_concurrency,
            variants,
        } => {
            apply_siege_overrides(
                &mut config.siege,
                SiegeOverrides {
                    app: app.as_ref(),
                    base_url: base_url.as_ref(),
                    query: query.as_ref(),
                    log_file: log_file.as_ref(),
                    max_concurrency: *max_concurrency,
                    variants: variants.as_ref(),
                },
            );
            siege_command(config.siege).await
        }
        Commands::Config { config_cmd } => match config_cmd {
            ConfigCommands::Validate { config_file } => handle_config_validate(config_file),
            ConfigCommands::Generate { output, force } => handle_config_generate(output, *force),
            ConfigCommands::Show { format } => {
                println!("{}", render_config(&config, format)?);
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides() {
        let mut config = EndpointConfig::default();
        apply_serve_overrides(&mut config, Some(&"127.0.0.1".to_string()), Some(8080), Some(500_000))
            .unwrap();

        assert_eq!(config.server_address(), "127.0.0.1:8080");
        assert_eq!(config.max_response_chars, Some(500_000));
    }

    #[test]
    fn test_serve_override_validation() {
        let mut config = EndpointConfig::default();
        assert!(apply_serve_overrides(&mut config, None, Some(0), None).is_err());
    }

    #[test]
    fn test_siege_overrides() {
        let mut config = SiegeConfig::default();
        let app = "fake-work-app".to_string();
        let variants = vec!["puma".to_string(), " ".to_string(), "unicorn ".to_string()];

        apply_siege_overrides(
            &mut config,
            SiegeOverrides {
                app: Some(&app),
                base_url: None,
                query: None,
                log_file: None,
                max_concurrency: Some(2),
                variants: Some(&variants),
            },
        );

        assert_eq!(config.app, "fake-work-app");
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.variants, vec!["puma", "unicorn"]);
        assert_eq!(config.log_file, PathBuf::from("siege.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("fakework.yaml");

        handle_config_generate(&output, false).unwrap();
        assert!(output.exists());
        assert!(handle_config_generate(&output, false).is_err());
        assert!(handle_config_generate(&output, true).is_ok());

        let parsed: FakeworkConfig =
            serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(parsed, FakeworkConfig::default());
    }

    #[test]
    fn test_render_config_formats() {
        let config = FakeworkConfig::default();
        assert!(render_config(&config, "json").unwrap().contains("\"endpoint\""));
        assert!(render_config(&config, "YAML").unwrap().contains("endpoint:"));
        assert!(render_config(&config, "toml").is_err());
    }
}
