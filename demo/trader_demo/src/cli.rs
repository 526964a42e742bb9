//! Command line surface of the `trader-demo` binary.
//!
//! Two independent modes, selected once at startup:
//!
//! - `trader-demo backchain` - backchain stress test against the three
//!   configured nodes
//! - `trader-demo trade --role <BANK|SELLER>` - start one side of the trade

use crate::config::{ConfigError, DemoConfig};
use crate::error::DemoError;
use crate::schedule::DepthSchedule;
use crate::workflow::{
    BackchainWorkflow, DemoWorkflow, ProgressCallback, Role, TradeWorkflow, WorkflowResult,
};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use ledger_rpc::SessionConnector;
use std::path::PathBuf;

/// Printed ahead of clap's help when the arguments cannot be parsed
pub const USAGE: &str = "\
Usage: trader-demo trade --role [BANK|SELLER]
       trader-demo backchain [--start <N>] [--end <N>] [--step <N>] [--report-dir <DIR>]";

/// Trader demo: backchain stress test and trade launcher
#[derive(Parser, Debug)]
#[command(name = "trader-demo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build ever deeper transaction backchains and time each depth
    Backchain {
        /// First chain depth
        #[arg(long)]
        start: Option<u32>,

        /// Last chain depth (inclusive)
        #[arg(long)]
        end: Option<u32>,

        /// Increment between depths
        #[arg(long)]
        step: Option<u32>,

        /// Directory to write the JSON timing report to
        #[arg(long, value_name = "DIR")]
        report_dir: Option<PathBuf>,
    },

    /// Start one side of the trade negotiation
    Trade {
        /// Side of the trade to play
        #[arg(long, value_enum)]
        role: Role,
    },
}

impl Command {
    /// Fold command line overrides into the loaded configuration
    pub fn apply_overrides(&self, mut config: DemoConfig) -> Result<DemoConfig, ConfigError> {
        if let Command::Backchain {
            start,
            end,
            step,
            report_dir,
        } = self
        {
            let current = config.backchain.schedule;
            let schedule = DepthSchedule::new(
                start.unwrap_or(current.start()),
                end.unwrap_or(current.end()),
                step.unwrap_or(current.step()),
            )?;
            config = config.with_schedule(schedule);

            if let Some(dir) = report_dir {
                config.report_dir = Some(dir.clone());
            }
        }
        Ok(config)
    }

    /// Run the selected workflow
    pub async fn execute<C: SessionConnector>(
        &self,
        connector: C,
        config: &DemoConfig,
        progress: Option<ProgressCallback>,
    ) -> Result<WorkflowResult, DemoError> {
        match self {
            Command::Backchain { .. } => {
                BackchainWorkflow::new(connector)
                    .run(config, progress)
                    .await
            }
            Command::Trade { role } => {
                TradeWorkflow::new(connector, *role)
                    .run(config, progress)
                    .await
            }
        }
    }
}

impl Cli {
    /// Load, override and validate the configuration for this invocation
    pub fn load_config(&self) -> Result<DemoConfig, ConfigError> {
        let config = DemoConfig::load_or_default(self.config.as_deref())?.with_env_override();
        let mut config = self.command.apply_overrides(config)?;
        if self.verbose {
            config.log_level = "debug".to_string();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Process exit status for an argument parse failure.
///
/// `--help` and `--version` surface as clap errors too but are not failures.
pub fn parse_failure_status(error: &clap::Error) -> u8 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
