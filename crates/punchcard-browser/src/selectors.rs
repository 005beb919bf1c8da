//! CSS anchor points of the timesheet pages.
//!
//! The page layout is externally controlled; every selector the session
//! relies on lives here so a site change is a one-file fix.

/// Login page, relative to the base URL.
pub(crate) const LOGIN_PATH: &str = "login.php#login";
/// Hours-report fragment; range endpoints are appended as path segments.
pub(crate) const REPORT_FRAGMENT: &str = "#report";

pub(crate) const LOGIN_FORM: &str = "#loginForm";
pub(crate) const LOGIN_EMAIL: &str = "#email";
pub(crate) const LOGIN_PASSWORD: &str = "#password";
pub(crate) const LOGIN_SUBMIT: &str = "[name='submit']";

/// Navigation element that opens the report view. The class name is the
/// site's own spelling.
pub(crate) const CALENDAR_NAV: &str = ".calender";

pub(crate) const REPORT_TABLE: &str = ".employee-report";
pub(crate) const REPORT_ROW: &str = "tr";

pub(crate) const ROW_DATE: &str = ".employee-information p";
pub(crate) const ROW_SPECIAL_DAY: &str = ".specialDayDescription";
pub(crate) const ROW_ABSENCE_MARKER: &str = ".missing";
pub(crate) const ROW_ABSENCE_REASON: &str = ".text-center .missing";
pub(crate) const ROW_CHECKIN: &str = ".checkin";
pub(crate) const ROW_CHECKOUT: &str = ".checkout";

/// Per-cell toggle spans; exactly two per interactive row.
pub(crate) const CELL_TOGGLE: &str = ".ltr";
/// Time inputs revealed by clicking a toggle.
pub(crate) const CELL_INPUT: &str = ".report-entry";
