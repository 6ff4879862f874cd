//! Command implementations

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use spoutgen::util::config::Config;
use spoutgen::util::diagnostic::suggestions;

pub mod check;
pub mod completions;
pub mod generate;
pub mod init;
pub mod locate;
pub mod module;
pub mod passes;

/// Settings shared by every command.
pub struct Context {
    pub start_dir: PathBuf,
    config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(start_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let start_dir = match start_dir {
            Some(dir) => dir
                .canonicalize()
                .with_context(|| format!("start directory not found: {}", dir.display()))?,
            None => std::env::current_dir().context("failed to get current directory")?,
        };
        Ok(Context {
            start_dir,
            config_path,
        })
    }

    /// Load the configuration for this run. Loaded lazily so `init` works
    /// next to a broken file.
    pub fn config(&self) -> Result<Config> {
        if let Some(path) = &self.config_path {
            if !path.is_file() {
                bail!(
                    "config file not found: {}\n{}",
                    path.display(),
                    suggestions::NO_CONFIG
                );
            }
        }
        Config::discover(&self.start_dir, self.config_path.as_deref())
    }
}
