//! # Trader Demo Orchestrator
//!
//! Drives already-running ledger nodes over RPC to exercise two workflows:
//!
//! - **Backchain stress test**: repeatedly issues and moves cash between two
//!   parties to build ever deeper transaction dependency chains, timing each
//!   chain depth
//! - **Trade launcher**: starts the issuer or seller side of the trade
//!   negotiation, selected by a `BANK`/`SELLER` role
//!
//! Both workflows are reached through the `trader-demo` binary as separate
//! subcommands and issue their remote calls strictly one after another.
//! All node endpoints, party names, amounts and the depth schedule come from
//! [`config::DemoConfig`], whose defaults are the fixed values in
//! [`constants`].

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod report;
pub mod schedule;
pub mod workflow;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cli::{Cli, Command};
    pub use crate::config::DemoConfig;
    pub use crate::error::DemoError;
    pub use crate::schedule::DepthSchedule;
    pub use crate::workflow::{
        BackchainWorkflow, DemoWorkflow, Phase, PhaseTiming, ProgressCallback, Role,
        TradeWorkflow, WorkflowResult,
    };
}
