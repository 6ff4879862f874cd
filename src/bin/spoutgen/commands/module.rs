//! `spoutgen module` command

use anyhow::Result;

use super::Context;
use crate::cli::ModuleArgs;
use spoutgen::ops::Session;

pub fn execute(ctx: &Context, args: ModuleArgs) -> Result<()> {
    let config = ctx.config()?;
    let session = Session::prepare(&config, &ctx.start_dir, None)?;
    let module = &session.module;

    if args.json {
        println!("{}", serde_json::to_string_pretty(module)?);
        return Ok(());
    }

    println!("module {}", module.name());

    println!("\ninclude dirs:");
    for dir in module.include_dirs() {
        println!("  {}", dir.display());
    }

    println!("\nheaders ({}):", module.header_count());
    for header in module.headers() {
        println!("  {}", header.display());
    }

    println!("\nsources ({}):", module.source_count());
    for source in module.sources() {
        println!("  {}", source.display());
    }

    println!("\nlibrary dirs:");
    for dir in module.library_dirs() {
        println!("  {}", dir.display());
    }

    println!("\nlibraries:");
    for lib in module.libraries() {
        println!("  {}", lib);
    }

    println!("\noutput: {}", session.options.output_dir.display());

    Ok(())
}
