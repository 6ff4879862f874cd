//! `spoutgen generate` command

use anyhow::Result;

use super::Context;
use crate::cli::GenerateArgs;
use spoutgen::ops::{generate, GenerateOptions, GenerateOutcome};

pub fn execute(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let config = ctx.config()?;
    let opts = GenerateOptions {
        start_dir: ctx.start_dir.clone(),
        output_dir: args.output,
        dry_run: args.dry_run,
    };

    let outcome = generate(&config, &opts)?;
    print!("{}", summarize(&outcome));

    Ok(())
}

/// Human-readable run summary.
pub fn summarize(outcome: &GenerateOutcome) -> String {
    let report = &outcome.report;
    let mut out = String::new();

    out.push_str(&format!(
        "filter: {} classes inspected, {} ignored, {} kept by override\n",
        report.filter.inspected,
        report.filter.ignored.len(),
        report.filter.overridden.len()
    ));
    for name in &report.filter.ignored {
        out.push_str(&format!("  ignored {}\n", name));
    }
    for name in &report.filter.overridden {
        out.push_str(&format!("  kept    {}\n", name));
    }

    out.push_str(&format!("stages: {}\n", report.stages.join(", ")));
    for renamed in &report.renamed {
        out.push_str(&format!("renamed namespace {} -> {}\n", renamed.from, renamed.to));
    }

    let verb = if outcome.dry_run { "Would write" } else { "Wrote" };
    for path in &outcome.outputs {
        out.push_str(&format!("{} {}\n", verb, path.display()));
    }
    out
}
