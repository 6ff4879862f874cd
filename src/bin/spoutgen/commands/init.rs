//! `spoutgen init` command

use anyhow::Result;

use super::Context;
use crate::cli::InitArgs;
use spoutgen::ops::{init_config, InitOptions};

pub fn execute(ctx: &Context, args: InitArgs) -> Result<()> {
    let path = init_config(&ctx.start_dir, &InitOptions { force: args.force })?;
    eprintln!("     Created {}", path.display());
    Ok(())
}
