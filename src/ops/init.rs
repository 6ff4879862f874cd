//! Implementation of `spoutgen init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::util::config::{Config, PROJECT_CONFIG_FILE};
use crate::util::diagnostic::suggestions;

/// Options for writing a starter configuration.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Overwrite an existing file
    pub force: bool,
}

/// Write `spoutgen.toml` with every default spelled out into `dir`.
pub fn init_config(dir: &Path, opts: &InitOptions) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("destination `{}` is not a directory", dir.display());
    }

    let path = dir.join(PROJECT_CONFIG_FILE);
    if path.exists() && !opts.force {
        bail!(
            "`{}` already exists in `{}`\n{}",
            PROJECT_CONFIG_FILE,
            dir.display(),
            suggestions::CONFIG_EXISTS
        );
    }

    Config::default()
        .save(&path)
        .with_context(|| format!("failed to initialize {}", dir.display()))?;

    Ok(path)
}
