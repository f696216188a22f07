//! Element Inspector
//!
//! Command-line front end: drives the inspector against JSON page fixtures.

mod cli;
mod cmd_inspect;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inspector_config::{Config, ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};
use crate::cmd_inspect::InspectArgs;

/// Get the .element-inspector directory path.
fn inspector_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".element-inspector"))
        .unwrap_or_else(|| PathBuf::from(".element-inspector"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.element-inspector/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = inspector_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("element-inspector")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive until exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console on stderr; stdout carries command output
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load and validate the configuration, falling back to defaults when absent.
fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        for e in &result.errors {
            error!("Config {}: {}", e.path, e.message);
        }
        return Err(format!("Invalid configuration in {}", path.display()).into());
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    info!("Element Inspector v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Inspect {
            page,
            x,
            y,
            right_click,
            export,
        } => {
            let args = InspectArgs {
                page,
                x,
                y,
                right_click,
                export,
            };
            cmd_inspect::inspect(&config, args).await?;
        }
        Commands::Capture { page, id } => {
            cmd_inspect::capture(&config, &page, &id)?;
        }
    }

    Ok(())
}
