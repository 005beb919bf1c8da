use crate::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::BTreeSet;

/// Parse an `HH:MM` clock time as typed into the report inputs.
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| Error::InvalidClockTime(s.to_string()))
}

/// Render a clock time back to the `HH:MM` form the site expects.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse an ISO `YYYY-MM-DD` date as given on the command line.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Inclusive date range that the report view is asked to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if to < from {
            return Err(Error::InvalidRange(from, to));
        }
        Ok(Self { from, to })
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = self.from;
        while current <= self.to {
            days.push(current);
            current += Duration::days(1);
        }
        days
    }
}

/// Whether a matched cell receives the planned time or gets cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Fill,
    Clear,
}

/// The two time-entry cells of a report row, in the order the page lays
/// them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    CheckIn,
    CheckOut,
}

impl Cell {
    /// Position of the cell among the row's entry toggles and inputs.
    pub fn index(self) -> usize {
        match self {
            Cell::CheckIn => 0,
            Cell::CheckOut => 1,
        }
    }

    /// The cell written after this one, if any.
    pub fn next(self) -> Option<Cell> {
        match self {
            Cell::CheckIn => Some(Cell::CheckOut),
            Cell::CheckOut => None,
        }
    }
}

/// One reporting request: which dates to touch, which times to write,
/// whether to clear instead, and whether already-reported days may be
/// rewritten.
#[derive(Debug, Clone)]
pub struct ReportPlan {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Range the report view is navigated to; `None` keeps the site's
    /// default view.
    pub range: Option<DateRange>,
    /// When present, only these dates are written.
    pub accept_dates: Option<BTreeSet<NaiveDate>>,
    /// Dates never written, even when accepted.
    pub ignore_dates: BTreeSet<NaiveDate>,
    pub mode: WriteMode,
    pub override_existing: bool,
}

impl ReportPlan {
    /// Plan over whatever the report view shows, optionally bounded by
    /// an explicit range.
    pub fn for_range(start_time: NaiveTime, end_time: NaiveTime, range: Option<DateRange>) -> Self {
        Self {
            start_time,
            end_time,
            range,
            accept_dates: None,
            ignore_dates: BTreeSet::new(),
            mode: WriteMode::Fill,
            override_existing: false,
        }
    }

    /// Single-day plan: only `date` is written.
    pub fn for_day(start_time: NaiveTime, end_time: NaiveTime, date: NaiveDate) -> Self {
        Self::for_range(start_time, end_time, None).with_accepted([date])
    }

    /// Seven-day plan starting at `week_start` (Sunday on the site's
    /// calendar).
    pub fn for_week(start_time: NaiveTime, end_time: NaiveTime, week_start: NaiveDate) -> Self {
        let days = (0..7).map(|i| week_start + Duration::days(i));
        Self::for_range(start_time, end_time, None).with_accepted(days)
    }

    pub fn with_accepted(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.accept_dates = Some(dates.into_iter().collect());
        self
    }

    pub fn with_ignored(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.ignore_dates.extend(dates);
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn overriding(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    /// The value typed into a given cell.
    pub fn time_for(&self, cell: Cell) -> NaiveTime {
        match cell {
            Cell::CheckIn => self.start_time,
            Cell::CheckOut => self.end_time,
        }
    }

    pub fn is_ignored(&self, date: NaiveDate) -> bool {
        self.ignore_dates.contains(&date)
    }

    /// Whether the plan wants this date written. A plan without an accept
    /// list takes every date the report view shows.
    pub fn is_requested(&self, date: NaiveDate) -> bool {
        match &self.accept_dates {
            Some(accepted) => accepted.contains(&date),
            None => true,
        }
    }
}
