//! Trader Demo CLI
//!
//! Entry point for the backchain stress test and the role-based trade launcher.

use clap::{CommandFactory, Parser};
use ledger_rpc::http::HttpConnector;
use std::process::ExitCode;
use trader_demo::cli::{parse_failure_status, USAGE};
use trader_demo::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    init_tracing(&config.log_level);

    tracing::info!("Trader Demo v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        schedule = ?config.backchain.schedule,
        report_dir = ?config.report_dir,
        "Configuration loaded"
    );

    let result = cli
        .command
        .execute(HttpConnector::new(), &config, None)
        .await?;

    tracing::info!(
        flows_started = result.flows_started,
        duration_ms = result.duration_ms,
        "Trader Demo finished"
    );
    if let Some(path) = &result.report_path {
        println!("Timing report: {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let status = parse_failure_status(&e);
            if status == 0 {
                let _ = e.print();
            } else {
                eprintln!("{}", e);
                eprintln!("{}", USAGE);
                eprintln!();
                let _ = Cli::command().print_help();
            }
            return ExitCode::from(status);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
