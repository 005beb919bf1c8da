use crate::OutputFormat;
use crate::commands::{RunArgs, run};
use anyhow::Result;
use punchcard_core::calendar;

pub fn execute(args: RunArgs, format: OutputFormat) -> Result<()> {
    let plan = args.plan_for_day(calendar::yesterday());
    run::execute(&args, plan, format)
}
