//! Playlist Pruner
//!
//! Finds repeated tracks in a YouTube Music playlist open in Chrome and
//! removes them through the page's own row menus.

mod adapters;
mod cli;
mod dispatch;
mod report;
mod server;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pruner_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use pruner_core::Request;

use crate::adapters::{log_dir, settings_from};
use crate::cli::{Cli, Commands};
use crate::dispatch::{BrowserRunner, CommandRunner, fixture_pruner};

/// Initialize tracing with console and file output.
///
/// Log files are written to the configured directory with daily rotation.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = log_dir(logging);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pruner")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer on stderr; stdout carries command output
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    if let Some(endpoint) = &cli.endpoint {
        config.browser.endpoint = endpoint.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    init_tracing(&config.logging)?;

    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if let Some(err) = validation.into_error() {
        error!("Invalid configuration: {}", err);
        return Err(err.into());
    }

    info!(config = %cli.config.display(), endpoint = %config.browser.endpoint, "Starting pruner");

    let settings = settings_from(&config);

    if let Some(path) = &cli.fixture {
        let runner = fixture_pruner(path, settings)?;
        return run(&cli, &config, runner).await;
    }

    let runner = BrowserRunner {
        endpoint: config.browser.endpoint.clone(),
        tab: cli.tab.clone(),
        host_prefix: config.browser.host_prefix.clone(),
        selectors: config.selectors.clone(),
        settings,
    };
    run(&cli, &config, runner).await
}

async fn run<R: CommandRunner + 'static>(
    cli: &Cli,
    config: &Config,
    runner: R,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(request) = cli.command.request() else {
        server::run_server(runner, &config.server.host, config.server.port).await?;
        return Ok(ExitCode::SUCCESS);
    };

    let response = runner.execute(request).await;
    print_response(cli.json, request, &response)?;

    Ok(if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_response(
    json: bool,
    request: Request,
    response: &pruner_core::Response,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", report::render(request, response));
    }
    Ok(())
}
