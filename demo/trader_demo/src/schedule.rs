//! Chain depth schedule for the backchain stress test.

use crate::constants::{SCHEDULE_END, SCHEDULE_START, SCHEDULE_STEP};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a schedule is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule start must be at least 1")]
    ZeroStart,

    #[error("schedule step must be at least 1")]
    ZeroStep,

    #[error("schedule start {start} is after end {end}")]
    Empty { start: u32, end: u32 },
}

/// Ascending chain depths: `start, start + step, ...` up to and including `end`.
///
/// Always non-empty and strictly increasing; the only way to build one is
/// through [`DepthSchedule::new`], including when deserialising.
///
/// ```
/// use trader_demo::schedule::DepthSchedule;
///
/// let schedule = DepthSchedule::default();
/// assert_eq!(schedule.len(), 100);
/// assert_eq!(schedule.depths().last(), Some(991));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleBounds")]
pub struct DepthSchedule {
    start: u32,
    end: u32,
    step: u32,
}

#[derive(Deserialize)]
struct ScheduleBounds {
    start: u32,
    end: u32,
    step: u32,
}

impl TryFrom<ScheduleBounds> for DepthSchedule {
    type Error = ScheduleError;

    fn try_from(bounds: ScheduleBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end, bounds.step)
    }
}

impl DepthSchedule {
    pub fn new(start: u32, end: u32, step: u32) -> Result<Self, ScheduleError> {
        if start == 0 {
            return Err(ScheduleError::ZeroStart);
        }
        if step == 0 {
            return Err(ScheduleError::ZeroStep);
        }
        if start > end {
            return Err(ScheduleError::Empty { start, end });
        }
        Ok(Self { start, end, step })
    }

    /// Schedule with one depth
    pub fn single(depth: u32) -> Result<Self, ScheduleError> {
        Self::new(depth, depth, 1)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Depths in ascending order
    pub fn depths(&self) -> impl Iterator<Item = u32> {
        (self.start..=self.end).step_by(self.step as usize)
    }

    /// Number of depths
    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step) as usize + 1
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flow starts a full run performs: `1 + 2d + 1` per depth `d`
    pub fn total_flows(&self) -> u64 {
        self.depths().map(|d| 2 * u64::from(d) + 2).sum()
    }
}

impl Default for DepthSchedule {
    fn default() -> Self {
        Self {
            start: SCHEDULE_START,
            end: SCHEDULE_END,
            step: SCHEDULE_STEP,
        }
    }
}
