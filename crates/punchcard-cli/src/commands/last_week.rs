use crate::OutputFormat;
use crate::commands::{RunArgs, run};
use anyhow::Result;
use punchcard_core::calendar;

pub fn execute(args: RunArgs, format: OutputFormat) -> Result<()> {
    let week_start = calendar::previous_week_start(calendar::today());
    let plan = args.plan_for_week(week_start);
    run::execute(&args, plan, format)
}
