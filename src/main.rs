//! Inspect AX - right-click accessibility inspector
//!
//! Main entry point for the Inspect AX CLI.

mod cli;
mod cmd_inspect;
mod runtime;

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inspect_ax_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use inspect_ax_protocols::Pointer;

use crate::cli::{Cli, Commands};
use crate::cmd_inspect::{run_inspect, run_locate, run_snapshot};

/// Get the .inspect-ax directory path.
fn inspect_ax_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".inspect-ax"))
        .unwrap_or_else(|| PathBuf::from(".inspect-ax"))
}

/// Initialize tracing with console output and, when enabled, daily log files
/// under ~/.inspect-ax/logs/.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Console output goes to stderr so stdout carries only command output.
    let console = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    if !logging.file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .init();
        return Ok(());
    }

    let log_dir = inspect_ax_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("inspect-ax")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let path = PathBuf::from(ConfigLoader::expand_path(path));
    Ok(ConfigLoader::load_or_default(&path)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config.to_string_lossy())?;
    init_tracing(&config.logging)?;
    debug!("Configuration from {}", cli.config.display());

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        let details: Vec<String> = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        return Err(format!("Invalid configuration: {}", details.join("; ")).into());
    }

    match cli.command {
        Commands::Inspect(args) => run_inspect(config, args).await,
        Commands::Snapshot { page, target, json } => run_snapshot(&config, &page, &target, json),
        Commands::Locate {
            page,
            selector,
            xpath,
            x,
            y,
        } => {
            let pointer = x.zip(y).map(|(x, y)| Pointer::new(x, y));
            run_locate(&page, selector, xpath, pointer)
        }
    }
}
