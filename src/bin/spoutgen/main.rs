//! spoutgen CLI - binding generation policy for SpoutDX

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Context;
use spoutgen::util::diagnostic;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<spoutgen::Error>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("spoutgen=debug")
    } else {
        EnvFilter::new("spoutgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    let ctx = Context::new(cli.start_dir, cli.config)?;

    // Execute command
    match cli.command {
        Commands::Locate(args) => commands::locate::execute(&ctx, args),
        Commands::Module(args) => commands::module::execute(&ctx, args),
        Commands::Check(args) => commands::check::execute(&ctx, args),
        Commands::Passes => commands::passes::execute(&ctx),
        Commands::Generate(args) => commands::generate::execute(&ctx, args),
        Commands::Init(args) => commands::init::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
