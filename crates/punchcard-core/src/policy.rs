use crate::plan::ReportPlan;
use chrono::NaiveDate;

/// Row classes the site uses for non-interactive rest-day rows.
const REST_DAY_CLASSES: [&str; 2] = ["no-pointer", "highlightingRestDays"];

/// Placeholder the page renders in empty marker cells.
const EMPTY_MARKER: &str = "+";

/// Date format of the leading token in a row's date cell.
const ROW_DATE_FORMAT: &str = "%d/%m/%Y";

/// Textual contents of one report row, as scraped from the page.
#[derive(Debug, Clone, Default)]
pub struct RowSnapshot {
    /// The row's `class` attribute.
    pub row_classes: String,
    /// Date cell text, e.g. `07/08/2026 Friday`.
    pub date_text: String,
    /// Site-wide special-day description (holidays).
    pub special_day: String,
    /// The employee's absence marker cell.
    pub absence_marker: String,
    /// The centered absence-reason cell (vacation, sickness).
    pub absence_reason: String,
    pub checkin: String,
    pub checkout: String,
}

impl RowSnapshot {
    /// Parse the leading `dd/mm/yyyy` token of the date cell.
    pub fn date(&self) -> Option<NaiveDate> {
        let token = self.date_text.split_whitespace().next()?;
        NaiveDate::parse_from_str(token, ROW_DATE_FORMAT).ok()
    }

    fn is_rest_day(&self) -> bool {
        self.row_classes
            .split_whitespace()
            .any(|class| REST_DAY_CLASSES.contains(&class))
    }

    fn is_filled(&self) -> bool {
        !is_blank(&self.checkin) && !is_blank(&self.checkout)
    }
}

/// A cell is blank when it trims to nothing or holds the `+` placeholder.
fn is_blank(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == EMPTY_MARKER
}

/// Why a row was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Non-interactive weekend/holiday shading.
    RestDay,
    /// Header or otherwise unparseable row.
    Malformed,
    /// Site-wide special day.
    SpecialDay,
    /// Recorded vacation, sickness, or other absence.
    Absence,
    /// Both cells already hold times and override was not requested.
    AlreadyFilled,
    /// Date is on the plan's ignore list.
    Ignored,
    /// Plan has an accept list and this date is not on it.
    NotRequested,
}

/// What the fill loop should do with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Fill,
    Skip(SkipReason),
}

/// Decide whether a row receives a time value. First match wins; holidays
/// and absences are never overwritten, override only bypasses the
/// already-filled check.
pub fn evaluate_row(row: &RowSnapshot, plan: &ReportPlan) -> RowAction {
    if row.is_rest_day() {
        return RowAction::Skip(SkipReason::RestDay);
    }

    let Some(date) = row.date() else {
        return RowAction::Skip(SkipReason::Malformed);
    };

    if !is_blank(&row.special_day) {
        return RowAction::Skip(SkipReason::SpecialDay);
    }

    if !is_blank(&row.absence_marker) || !is_blank(&row.absence_reason) {
        return RowAction::Skip(SkipReason::Absence);
    }

    if !plan.override_existing && row.is_filled() {
        return RowAction::Skip(SkipReason::AlreadyFilled);
    }

    if plan.is_ignored(date) {
        return RowAction::Skip(SkipReason::Ignored);
    }

    if !plan.is_requested(date) {
        return RowAction::Skip(SkipReason::NotRequested);
    }

    RowAction::Fill
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ReportPlan;
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn open_plan() -> ReportPlan {
        ReportPlan::for_range(t(9, 0), t(19, 0), None)
    }

    fn empty_row() -> RowSnapshot {
        RowSnapshot {
            date_text: "07/08/2026 Friday".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_workday_row_is_filled() {
        assert_eq!(evaluate_row(&empty_row(), &open_plan()), RowAction::Fill);
    }

    #[test]
    fn test_rest_day_classes_skip() {
        for class in ["no-pointer", "highlightingRestDays"] {
            let row = RowSnapshot {
                row_classes: format!("row-hover {class}"),
                ..empty_row()
            };
            assert_eq!(
                evaluate_row(&row, &open_plan()),
                RowAction::Skip(SkipReason::RestDay)
            );
        }
    }

    #[test]
    fn test_unrelated_classes_do_not_skip() {
        let row = RowSnapshot {
            row_classes: "odd selected".to_string(),
            ..empty_row()
        };
        assert_eq!(evaluate_row(&row, &open_plan()), RowAction::Fill);
    }

    #[test]
    fn test_header_row_without_date_is_malformed() {
        let row = RowSnapshot::default();
        assert_eq!(
            evaluate_row(&row, &open_plan()),
            RowAction::Skip(SkipReason::Malformed)
        );
    }

    #[test]
    fn test_special_day_skips() {
        let row = RowSnapshot {
            special_day: "Independence Day".to_string(),
            ..empty_row()
        };
        assert_eq!(
            evaluate_row(&row, &open_plan()),
            RowAction::Skip(SkipReason::SpecialDay)
        );
    }

    #[test]
    fn test_plus_placeholder_counts_as_blank() {
        let row = RowSnapshot {
            special_day: "+".to_string(),
            absence_marker: "   +   ".to_string(),
            ..empty_row()
        };
        assert_eq!(evaluate_row(&row, &open_plan()), RowAction::Fill);
    }

    #[test]
    fn test_whitespace_only_cells_count_as_blank() {
        let row = RowSnapshot {
            special_day: "         ".to_string(),
            absence_reason: "                  ".to_string(),
            ..empty_row()
        };
        assert_eq!(evaluate_row(&row, &open_plan()), RowAction::Fill);
    }

    #[test]
    fn test_absence_marker_skips() {
        let row = RowSnapshot {
            absence_marker: "Vacation".to_string(),
            ..empty_row()
        };
        assert_eq!(
            evaluate_row(&row, &open_plan()),
            RowAction::Skip(SkipReason::Absence)
        );
    }

    #[test]
    fn test_absence_reason_skips() {
        let row = RowSnapshot {
            absence_reason: "Sickness".to_string(),
            ..empty_row()
        };
        assert_eq!(
            evaluate_row(&row, &open_plan()),
            RowAction::Skip(SkipReason::Absence)
        );
    }

    #[test]
    fn test_filled_row_skips_without_override() {
        let row = RowSnapshot {
            checkin: "09:00".to_string(),
            checkout: "19:00".to_string(),
            ..empty_row()
        };
        assert_eq!(
            evaluate_row(&row, &open_plan()),
            RowAction::Skip(SkipReason::AlreadyFilled)
        );
    }

    #[test]
    fn test_filled_row_accepted_with_override() {
        let row = RowSnapshot {
            checkin: "09:00".to_string(),
            checkout: "19:00".to_string(),
            ..empty_row()
        };
        let plan = open_plan().overriding(true);
        assert_eq!(evaluate_row(&row, &plan), RowAction::Fill);
    }

    #[test]
    fn test_half_filled_row_is_still_fillable() {
        // After a check-in write the loop revisits the row for the
        // check-out cell; only a fully reported day counts as filled.
        let row = RowSnapshot {
            checkin: "09:00".to_string(),
            ..empty_row()
        };
        assert_eq!(evaluate_row(&row, &open_plan()), RowAction::Fill);
    }

    #[test]
    fn test_ignored_date_skips() {
        let plan = open_plan().with_ignored([d(2026, 8, 7)]);
        assert_eq!(
            evaluate_row(&empty_row(), &plan),
            RowAction::Skip(SkipReason::Ignored)
        );
    }

    #[test]
    fn test_accept_list_limits_writes() {
        let plan = ReportPlan::for_day(t(9, 0), t(19, 0), d(2026, 8, 6));
        assert_eq!(
            evaluate_row(&empty_row(), &plan),
            RowAction::Skip(SkipReason::NotRequested)
        );

        let plan = ReportPlan::for_day(t(9, 0), t(19, 0), d(2026, 8, 7));
        assert_eq!(evaluate_row(&empty_row(), &plan), RowAction::Fill);
    }

    #[test]
    fn test_holiday_wins_over_override() {
        let row = RowSnapshot {
            special_day: "Passover".to_string(),
            checkin: "09:00".to_string(),
            checkout: "19:00".to_string(),
            ..empty_row()
        };
        let plan = open_plan().overriding(true);
        assert_eq!(
            evaluate_row(&row, &plan),
            RowAction::Skip(SkipReason::SpecialDay)
        );
    }

    #[test]
    fn test_row_date_parses_leading_token() {
        let row = RowSnapshot {
            date_text: "01/02/2026 Sunday".to_string(),
            ..Default::default()
        };
        assert_eq!(row.date(), Some(d(2026, 2, 1)));
    }

    #[test]
    fn test_row_date_rejects_non_dates() {
        let row = RowSnapshot {
            date_text: "Date".to_string(),
            ..Default::default()
        };
        assert_eq!(row.date(), None);
    }
}
