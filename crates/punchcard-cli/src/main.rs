use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use punchcard_cli::{OutputFormat, commands};

#[derive(Parser)]
#[command(name = "punchcard")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Automated check-in/check-out reporting for the Meckano web timesheet",
    long_about = "Punchcard drives a Chrome session against the Meckano web timesheet: it signs \
                  in, opens the hours report, and fills (or clears) check-in and check-out times \
                  for the days you ask for, skipping holidays, absences, rest days, and days \
                  that are already reported."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for the run summary
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a date range of the hours report
    Report {
        /// First day of the report range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Last day of the report range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Only write these dates (YYYY-MM-DD, repeatable)
        #[arg(long, value_name = "DATE")]
        only: Vec<String>,

        /// Never write these dates (YYYY-MM-DD, repeatable)
        #[arg(long, value_name = "DATE")]
        skip: Vec<String>,

        #[command(flatten)]
        run: commands::RunArgs,
    },

    /// Report today's hours
    Today {
        #[command(flatten)]
        run: commands::RunArgs,
    },

    /// Report yesterday's hours
    Yesterday {
        #[command(flatten)]
        run: commands::RunArgs,
    },

    /// Report every day of the previous week (Sunday through Saturday)
    LastWeek {
        #[command(flatten)]
        run: commands::RunArgs,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Report {
            from,
            to,
            only,
            skip,
            run,
        } => commands::report::execute(from, to, only, skip, run, cli.format),
        Commands::Today { run } => commands::today::execute(run, cli.format),
        Commands::Yesterday { run } => commands::yesterday::execute(run, cli.format),
        Commands::LastWeek { run } => commands::last_week::execute(run, cli.format),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("punchcard=debug,punchcard_core=debug,punchcard_browser=debug")
    } else {
        EnvFilter::new("punchcard=info,punchcard_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
