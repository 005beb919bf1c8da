use crate::plan::WriteMode;
use crate::policy::SkipReason;
use serde::Serialize;

/// Counters for one pass over the report table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillSummary {
    pub rows_visited: usize,
    pub cells_written: usize,
    pub cells_cleared: usize,
    pub rest_days: usize,
    pub malformed_rows: usize,
    pub special_days: usize,
    pub absences: usize,
    pub already_filled: usize,
    pub ignored: usize,
    pub not_requested: usize,
    /// Rows whose entry layout did not match expectations and were left
    /// untouched.
    pub write_anomalies: usize,
}

impl FillSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::RestDay => self.rest_days += 1,
            SkipReason::Malformed => self.malformed_rows += 1,
            SkipReason::SpecialDay => self.special_days += 1,
            SkipReason::Absence => self.absences += 1,
            SkipReason::AlreadyFilled => self.already_filled += 1,
            SkipReason::Ignored => self.ignored += 1,
            SkipReason::NotRequested => self.not_requested += 1,
        }
    }

    pub fn record_write(&mut self, mode: WriteMode) {
        match mode {
            WriteMode::Fill => self.cells_written += 1,
            WriteMode::Clear => self.cells_cleared += 1,
        }
    }

    pub fn rows_skipped(&self) -> usize {
        self.rest_days
            + self.malformed_rows
            + self.special_days
            + self.absences
            + self.already_filled
            + self.ignored
            + self.not_requested
    }
}
