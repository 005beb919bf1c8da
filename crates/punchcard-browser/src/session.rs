use crate::selectors;
use crate::{Error, Result};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use punchcard_core::plan::{Cell, DateRange, ReportPlan, WriteMode, format_clock};
use punchcard_core::policy::{self, RowAction, RowSnapshot};
use punchcard_core::summary::FillSummary;
use std::time::Duration;

/// Pause between filling the login fields and submitting the form.
const FORM_SETTLE_DELAY: Duration = Duration::from_secs(1);
/// Pause after submitting the login form, while the site redirects.
const POST_LOGIN_DELAY: Duration = Duration::from_secs(3);
/// Pause after opening the report view, while the table renders.
const REPORT_RENDER_DELAY: Duration = Duration::from_secs(1);

/// Initial `window.scrollTo` offset, and the increment applied per
/// processed line so the active row stays in view.
const SCROLL_START: u32 = 50;
const SCROLL_STEP: u32 = 30;

/// Login credentials for the timesheet site.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A driving session over the timesheet's hours report.
pub struct ReportSession {
    page: Page,
    base_url: String,
}

impl ReportSession {
    pub fn new(page: Page, base_url: impl Into<String>) -> Self {
        Self {
            page,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Sign in through the site's login form.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let url = login_url(&self.base_url);
        tracing::info!("signing in at {}", url);
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;

        let form = self
            .page
            .find_element(selectors::LOGIN_FORM)
            .await
            .map_err(|_| Error::Page("login form not found".to_string()))?;

        form.find_element(selectors::LOGIN_EMAIL)
            .await?
            .click()
            .await?
            .type_str(&credentials.email)
            .await?;
        form.find_element(selectors::LOGIN_PASSWORD)
            .await?
            .click()
            .await?
            .type_str(&credentials.password)
            .await?;

        tokio::time::sleep(FORM_SETTLE_DELAY).await;
        form.find_element(selectors::LOGIN_SUBMIT)
            .await?
            .click()
            .await?;
        tokio::time::sleep(POST_LOGIN_DELAY).await;

        Ok(())
    }

    /// Open the hours report, optionally jumping to an explicit date range.
    pub async fn open_report(&self, range: Option<&DateRange>) -> Result<()> {
        let calendar = self
            .page
            .find_element(selectors::CALENDAR_NAV)
            .await
            .map_err(|_| Error::Page("calendar navigation not found".to_string()))?;
        calendar.click().await?;

        if let Some(range) = range {
            self.page.goto(report_url(&self.base_url, range)).await?;
        }

        tokio::time::sleep(REPORT_RENDER_DELAY).await;
        Ok(())
    }

    /// Fill (or clear) every row the plan accepts.
    ///
    /// One cell is written per pass. Writes mutate the DOM and leave
    /// previously fetched rows stale, so after each write the report view
    /// is reopened and the row list re-read before continuing; the line
    /// index is positional across refreshes, as the site keeps row order
    /// stable within a range.
    pub async fn fill_report(&self, plan: &ReportPlan) -> Result<FillSummary> {
        let mut summary = FillSummary::new();
        let mut line_index = 0usize;
        let mut cell = Cell::CheckIn;
        let mut scroll_offset = SCROLL_START;

        'refreshed: loop {
            let rows = self.report_rows().await?;
            tracing::debug!(rows = rows.len(), line_index, "scanning report rows");

            while line_index < rows.len() {
                let row = &rows[line_index];
                let snapshot = self.snapshot_row(row).await?;

                match policy::evaluate_row(&snapshot, plan) {
                    RowAction::Skip(reason) => {
                        tracing::debug!(
                            line = line_index,
                            date = %snapshot.date_text,
                            ?reason,
                            "skipping row"
                        );
                        summary.record_skip(reason);
                        summary.rows_visited += 1;
                        line_index += 1;
                        cell = Cell::CheckIn;
                        scroll_offset += SCROLL_STEP;
                        self.scroll_to(scroll_offset).await?;
                    }
                    RowAction::Fill => {
                        self.write_cell(row, cell, plan, &mut summary).await?;

                        match cell.next() {
                            Some(next) => cell = next,
                            None => {
                                summary.rows_visited += 1;
                                line_index += 1;
                                cell = Cell::CheckIn;
                            }
                        }

                        self.open_report(plan.range.as_ref()).await?;
                        scroll_offset += SCROLL_STEP;
                        self.scroll_to(scroll_offset).await?;
                        continue 'refreshed;
                    }
                }
            }

            break;
        }

        Ok(summary)
    }

    /// Write one cell of a row: click its toggle to reveal the input, then
    /// type the planned time or clear it.
    async fn write_cell(
        &self,
        row: &Element,
        cell: Cell,
        plan: &ReportPlan,
        summary: &mut FillSummary,
    ) -> Result<()> {
        let toggles = row.find_elements(selectors::CELL_TOGGLE).await?;
        if toggles.len() != 2 {
            tracing::warn!(
                found = toggles.len(),
                "expected two entry toggles in row, leaving cell untouched"
            );
            summary.write_anomalies += 1;
            return Ok(());
        }
        toggles[cell.index()].click().await?;

        let inputs = row.find_elements(selectors::CELL_INPUT).await?;
        let input = inputs
            .get(cell.index())
            .ok_or_else(|| Error::Page(format!("no entry input for {:?} cell", cell)))?;

        match plan.mode {
            WriteMode::Fill => {
                let value = format_clock(plan.time_for(cell));
                tracing::info!(?cell, %value, "writing time entry");
                input.click().await?.type_str(&value).await?;
            }
            WriteMode::Clear => {
                tracing::info!(?cell, "clearing time entry");
                input.click().await?.press_key("Delete").await?;
            }
        }
        summary.record_write(plan.mode);

        Ok(())
    }

    async fn snapshot_row(&self, row: &Element) -> Result<RowSnapshot> {
        let row_classes = row.attribute("class").await?.unwrap_or_default();

        Ok(RowSnapshot {
            row_classes,
            date_text: self.cell_text(row, selectors::ROW_DATE).await?,
            special_day: self.cell_text(row, selectors::ROW_SPECIAL_DAY).await?,
            absence_marker: self.cell_text(row, selectors::ROW_ABSENCE_MARKER).await?,
            absence_reason: self.cell_text(row, selectors::ROW_ABSENCE_REASON).await?,
            checkin: self.cell_text(row, selectors::ROW_CHECKIN).await?,
            checkout: self.cell_text(row, selectors::ROW_CHECKOUT).await?,
        })
    }

    /// Text of a child cell; missing cells read as empty.
    async fn cell_text(&self, row: &Element, selector: &str) -> Result<String> {
        match row.find_element(selector).await {
            Ok(element) => Ok(element.inner_text().await?.unwrap_or_default()),
            Err(_) => Ok(String::new()),
        }
    }

    async fn report_rows(&self) -> Result<Vec<Element>> {
        let table = self
            .page
            .find_element(selectors::REPORT_TABLE)
            .await
            .map_err(|_| Error::Page("employee report table not found".to_string()))?;
        Ok(table.find_elements(selectors::REPORT_ROW).await?)
    }

    async fn scroll_to(&self, offset: u32) -> Result<()> {
        self.page
            .evaluate(format!("window.scrollTo(0, {offset})"))
            .await?;
        Ok(())
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn login_url(base_url: &str) -> String {
    format!("{}/{}", base_url, selectors::LOGIN_PATH)
}

fn report_url(base_url: &str, range: &DateRange) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url,
        selectors::REPORT_FRAGMENT,
        range.from.format("%Y-%m-%d"),
        range.to.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_loses_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://app.meckano.co.il/".to_string()),
            "https://app.meckano.co.il"
        );
    }

    #[test]
    fn test_login_url() {
        assert_eq!(
            login_url("https://app.meckano.co.il"),
            "https://app.meckano.co.il/login.php#login"
        );
    }

    #[test]
    fn test_report_url_carries_range_endpoints() {
        assert_eq!(
            report_url("https://app.meckano.co.il", &range()),
            "https://app.meckano.co.il/#report/2026-08-01/2026-08-07"
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "me@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
