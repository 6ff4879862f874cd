//! `spoutgen locate` command

use anyhow::Result;

use super::Context;
use crate::cli::LocateArgs;
use spoutgen::resolver::ResolvedPaths;

pub fn execute(ctx: &Context, args: LocateArgs) -> Result<()> {
    let config = ctx.config()?;
    let paths =
        ResolvedPaths::resolve(&ctx.start_dir, &config.paths).map_err(spoutgen::Error::from)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    println!("source tree:  {}", paths.source_tree.display());
    println!("interop tree: {}", paths.interop_tree.display());
    println!("build tree:   {}", paths.build_tree.display());
    println!("sdk root:     {}", paths.sdk_root.display());
    println!("sdk version:  {}", paths.sdk_version);
    println!("sdk include:  {}", paths.sdk_include_root().display());
    println!("sdk lib:      {}", paths.sdk_lib_root().display());

    Ok(())
}
