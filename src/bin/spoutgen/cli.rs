//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// spoutgen - binding generation policy for the SpoutDX interop module
#[derive(Parser)]
#[command(name = "spoutgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to the nearest spoutgen.toml)
    #[arg(long, global = true, env = "SPOUTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the upward searches start from (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub start_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved source, interop and build trees and the SDK version
    Locate(LocateArgs),

    /// Show the module the generator would bind
    Module(ModuleArgs),

    /// Explain how the declaration filter treats class names
    Check(CheckArgs),

    /// List the pipeline stages in run order
    Passes,

    /// Run the full generation pipeline
    Generate(GenerateArgs),

    /// Write a spoutgen.toml with the default settings
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct LocateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ModuleArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Class names to check
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Run every stage but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Output directory (overrides the configured one)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing spoutgen.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
