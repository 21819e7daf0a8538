//! asc CLI Binary
//!
//! Command-line interface for App Store Connect.

use asc::cli::{Cli, RunContext};
use asc::config::ConfigLoader;
use asc::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("asc starting");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    let code = runtime.block_on(run(cli));
    process::exit(code);
}

async fn run(cli: Cli) -> i32 {
    let context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => {
            info!("CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", asc::cli::map_error(&e));
            return 1;
        }
    };

    let cancel = context.request_context().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match context.execute(&cli.command, &mut out).await {
        Ok(()) => {
            info!("Command completed successfully");
            0
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", asc::cli::map_error(&e));
            1
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_with_path(path),
        None => ConfigLoader::load(),
    }
    .map(|c| c.logging)
    .unwrap_or_default();

    apply_cli_overrides(cli, &mut config);
    config
}

/// CLI flags win over file and environment settings. Any logging flag turns logging on.
fn apply_cli_overrides(cli: &Cli, config: &mut LoggingConfig) {
    if cli.verbose {
        config.enabled = true;
        if cli.log_level.is_none() && config.level == "info" {
            config.level = "debug".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
}
