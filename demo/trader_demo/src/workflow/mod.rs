//! Demo workflow definitions and implementations.
//!
//! Provides the trait interface and implementations for demo workflows:
//! - Backchain stress test
//! - Role-based trade launcher

mod backchain;
mod trade;

pub use backchain::{drive_backchain, BackchainRun, BackchainSessions, BackchainWorkflow};
pub use trade::{Role, TradeWorkflow};

use crate::config::DemoConfig;
use crate::error::DemoError;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Timed phase of one backchain depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `d` round-trip payment pairs between party A and the notary
    BackchainCreation,
    /// The single payment from party A to party B
    CrossPartyTransfer,
}

impl Phase {
    /// Label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::BackchainCreation => "Backchain creation",
            Self::CrossPartyTransfer => "party A to party B transfer",
        }
    }
}

/// Elapsed wall-clock time of one phase at one depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub depth: u32,
    pub phase: Phase,
    pub elapsed: Duration,
}

/// Progress callback receiving each timing record as it is taken
pub type ProgressCallback = Arc<dyn Fn(&PhaseTiming) + Send + Sync>;

/// Workflow execution result
#[derive(Debug, Clone)]
pub struct WorkflowResult {
    /// Execution duration in milliseconds
    pub duration_ms: u64,
    /// Number of remote flows started
    pub flows_started: usize,
    /// Phase timings, in the order they were taken
    pub timings: Vec<PhaseTiming>,
    /// Report written by the workflow, if any
    pub report_path: Option<PathBuf>,
}

impl WorkflowResult {
    pub fn new(duration_ms: u64, flows_started: usize) -> Self {
        Self {
            duration_ms,
            flows_started,
            timings: Vec::new(),
            report_path: None,
        }
    }

    pub fn with_timings(mut self, timings: Vec<PhaseTiming>) -> Self {
        self.timings = timings;
        self
    }
}

/// Demo workflow trait
///
/// Both demo modes implement this trait for unified execution.
#[async_trait]
pub trait DemoWorkflow: Send + Sync {
    /// Get the workflow name
    fn name(&self) -> &str;

    /// Execute the workflow
    async fn run(
        &self,
        config: &DemoConfig,
        progress: Option<ProgressCallback>,
    ) -> Result<WorkflowResult, DemoError>;
}
