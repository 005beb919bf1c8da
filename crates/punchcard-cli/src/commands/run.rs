use crate::OutputFormat;
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use punchcard_browser::{
    CdpConnector, ChromeFinder, ChromeLauncher, Credentials, ProfileManager, ReportSession,
};
use punchcard_core::plan::{DateRange, ReportPlan, WriteMode};
use punchcard_core::summary::FillSummary;
use std::path::PathBuf;

/// Arguments shared by every reporting mode.
#[derive(Args)]
pub struct RunArgs {
    /// Email address used to sign in to the timesheet
    #[arg(long, env = "PUNCHCARD_EMAIL")]
    pub email: String,

    /// Password used to sign in to the timesheet
    #[arg(long, env = "PUNCHCARD_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Check-in time written to each reported day
    #[arg(long, value_parser = parse_clock_arg, default_value = "09:00")]
    pub start_time: NaiveTime,

    /// Check-out time written to each reported day
    #[arg(long, value_parser = parse_clock_arg, default_value = "19:00")]
    pub end_time: NaiveTime,

    /// Clear matched cells instead of writing times
    #[arg(long)]
    pub clear: bool,

    /// Rewrite days that already have both times reported
    #[arg(long)]
    pub override_existing: bool,

    /// Base URL of the timesheet site
    #[arg(
        long,
        env = "PUNCHCARD_BASE_URL",
        default_value = "https://app.meckano.co.il"
    )]
    pub base_url: String,

    /// Path to the Chrome binary (autodetected when omitted)
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Named Chrome profile kept under ~/.punchcard/profiles
    #[arg(long)]
    pub profile: Option<String>,

    /// Run Chrome headless
    #[arg(long)]
    pub headless: bool,
}

fn parse_clock_arg(s: &str) -> Result<NaiveTime, String> {
    punchcard_core::plan::parse_clock(s).map_err(|e| e.to_string())
}

impl RunArgs {
    fn write_mode(&self) -> WriteMode {
        if self.clear {
            WriteMode::Clear
        } else {
            WriteMode::Fill
        }
    }

    pub fn plan_for_day(&self, date: NaiveDate) -> ReportPlan {
        ReportPlan::for_day(self.start_time, self.end_time, date)
            .with_mode(self.write_mode())
            .overriding(self.override_existing)
    }

    pub fn plan_for_week(&self, week_start: NaiveDate) -> ReportPlan {
        ReportPlan::for_week(self.start_time, self.end_time, week_start)
            .with_mode(self.write_mode())
            .overriding(self.override_existing)
    }

    pub fn plan_for_range(&self, range: Option<DateRange>) -> ReportPlan {
        ReportPlan::for_range(self.start_time, self.end_time, range)
            .with_mode(self.write_mode())
            .overriding(self.override_existing)
    }
}

/// Kill a process by PID (cross-platform)
fn kill_process_by_pid(pid: u32) {
    #[cfg(unix)]
    {
        use std::process::Command;
        let _ = Command::new("kill").arg(pid.to_string()).output();
    }

    #[cfg(windows)]
    {
        use std::process::Command;
        let _ = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/F"])
            .output();
    }
}

/// Drive one full reporting session: launch Chrome, sign in, open the
/// report, run the fill loop, print the summary, shut Chrome down.
pub fn execute(args: &RunArgs, plan: ReportPlan, format: OutputFormat) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        println!("🔍 Locating Chrome...");
        let finder = ChromeFinder::new(args.chrome_path.clone());
        let chrome_binary = finder.find()?;
        println!("✅ Found Chrome at: {}", chrome_binary.display());

        let profile_manager = if let Some(name) = &args.profile {
            let manager = ProfileManager::named(name)?;
            println!("📁 Using profile: {}", manager.path().display());
            manager
        } else {
            println!("📁 Using temporary profile");
            ProfileManager::temporary()?
        };

        let launcher = ChromeLauncher::new(
            chrome_binary,
            profile_manager.path().to_path_buf(),
            None,
        )
        .headless(args.headless);
        let debugging_port = launcher.debugging_port();

        println!("🚀 Launching Chrome...");
        let mut chrome_process = launcher.launch()?;
        let chrome_pid = chrome_process.id();
        tracing::debug!(pid = chrome_pid, "Chrome started");

        let connector = CdpConnector::new(debugging_port);
        let (browser, handler_task) = connector.connect().await?;
        let page = connector.page(&browser).await?;

        let session = ReportSession::new(page, args.base_url.clone());
        let credentials = Credentials {
            email: args.email.clone(),
            password: args.password.clone(),
        };

        println!("🔐 Signing in...");
        session.login(&credentials).await?;

        println!("🗓️  Opening the hours report...");
        session.open_report(plan.range.as_ref()).await?;

        println!("⏱️  Filling report rows...");
        let summary = session.fill_report(&plan).await?;

        print_summary(&summary, format)?;

        handler_task.abort();
        drop(browser);
        kill_process_by_pid(chrome_pid);
        let _ = tokio::task::spawn_blocking(move || chrome_process.wait()).await;

        Ok(())
    });

    // Shut the runtime down promptly so lingering blocking tasks cannot hang the exit
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

fn print_summary(summary: &FillSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Pretty => {
            use console::style;

            println!();
            println!("{}", style("Report complete").bold().cyan());
            println!("  rows visited:   {}", summary.rows_visited);
            println!("  cells written:  {}", summary.cells_written);
            if summary.cells_cleared > 0 {
                println!("  cells cleared:  {}", summary.cells_cleared);
            }

            let skipped = summary.rows_skipped();
            if skipped > 0 {
                println!("  rows skipped:   {}", skipped);
                for (label, count) in [
                    ("rest days", summary.rest_days),
                    ("holidays", summary.special_days),
                    ("absences", summary.absences),
                    ("already filled", summary.already_filled),
                    ("ignored dates", summary.ignored),
                    ("not requested", summary.not_requested),
                    ("malformed rows", summary.malformed_rows),
                ] {
                    if count > 0 {
                        println!("    {:<16}{}", format!("{}:", label), count);
                    }
                }
            }

            if summary.write_anomalies > 0 {
                println!(
                    "  {} row(s) had an unexpected entry layout and were left untouched",
                    style(summary.write_anomalies).yellow()
                );
            }
        }
    }

    Ok(())
}
