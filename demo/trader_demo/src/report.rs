//! JSON timing report for backchain runs.

use crate::error::DemoError;
use crate::schedule::DepthSchedule;
use crate::workflow::{Phase, WorkflowResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One timing record as written to the report
#[derive(Debug, Clone, Serialize)]
pub struct TimingRecord {
    pub depth: u32,
    pub phase: Phase,
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Report of a completed backchain run
#[derive(Debug, Clone, Serialize)]
pub struct BackchainReport {
    pub report_type: &'static str,
    pub generated_at: DateTime<Utc>,
    pub schedule: DepthSchedule,
    pub flows_started: usize,
    pub duration_ms: u64,
    pub timings: Vec<TimingRecord>,
}

impl BackchainReport {
    pub fn new(schedule: &DepthSchedule, result: &WorkflowResult) -> Self {
        let timings = result
            .timings
            .iter()
            .map(|t| TimingRecord {
                depth: t.depth,
                phase: t.phase,
                label: t.phase.label(),
                elapsed_ms: t.elapsed.as_secs_f64() * 1000.0,
            })
            .collect();

        Self {
            report_type: "Backchain Timings",
            generated_at: Utc::now(),
            schedule: *schedule,
            flows_started: result.flows_started,
            duration_ms: result.duration_ms,
            timings,
        }
    }

    /// File name derived from the generation time, down to the millisecond
    pub fn file_name(&self) -> String {
        format!(
            "BACKCHAIN_{}.json",
            self.generated_at.format("%Y%m%d_%H%M%S_%3f")
        )
    }

    pub fn to_json(&self) -> Result<String, DemoError> {
        serde_json::to_string_pretty(self).map_err(|e| DemoError::report(e.to_string()))
    }

    /// Write the report into `dir`, creating it if needed, and return the file path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, DemoError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}
