use crate::OutputFormat;
use crate::commands::{RunArgs, run};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use punchcard_core::plan::{DateRange, parse_iso_date};

pub fn execute(
    from: Option<String>,
    to: Option<String>,
    only: Vec<String>,
    skip: Vec<String>,
    args: RunArgs,
    format: OutputFormat,
) -> Result<()> {
    let range = match (from, to) {
        (Some(from), Some(to)) => Some(DateRange::new(
            parse_iso_date(&from)?,
            parse_iso_date(&to)?,
        )?),
        (None, None) => None,
        _ => bail!("--from and --to must be given together"),
    };

    let only = parse_date_list(only)?;
    let skip = parse_date_list(skip)?;

    let mut plan = args.plan_for_range(range);
    if !only.is_empty() {
        plan = plan.with_accepted(only);
    }
    plan = plan.with_ignored(skip);

    run::execute(&args, plan, format)
}

fn parse_date_list(raw: Vec<String>) -> Result<Vec<NaiveDate>> {
    raw.iter()
        .map(|s| parse_iso_date(s).map_err(Into::into))
        .collect()
}
