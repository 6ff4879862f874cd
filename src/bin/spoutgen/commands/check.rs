//! `spoutgen check` command

use anyhow::Result;

use super::Context;
use crate::cli::CheckArgs;
use spoutgen::filter::FilterRules;

pub fn execute(ctx: &Context, args: CheckArgs) -> Result<()> {
    let config = ctx.config()?;
    let rules = FilterRules::from_config(&config.filter);

    let width = args.names.iter().map(String::len).max().unwrap_or(0);
    for name in &args.names {
        let decision = rules.evaluate(name);
        println!("{:width$}  {}", name, decision, width = width);
    }

    Ok(())
}
