//! `spoutgen passes` command

use anyhow::Result;

use super::Context;
use spoutgen::passes::Pipeline;

pub fn execute(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let pipeline = Pipeline::from_config(&config);

    for (i, stage) in pipeline.stages().iter().enumerate() {
        println!("{:>2}. {}", i + 1, stage);
    }

    Ok(())
}
