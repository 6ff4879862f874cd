//! Configuration file support for spoutgen.
//!
//! Every field has a default that reproduces the stock SpoutDX run, so an
//! empty file (or none at all) is a valid configuration. Lookup order:
//! - An explicit path given on the command line
//! - Project: the nearest `spoutgen.toml` at or above the start directory
//! - Global: `~/.spoutgen/config.toml`
//!
//! The first file found wins; missing sections fall back to defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::{GeneratorOptions, OutputMode};

/// File name looked up from the start directory upward.
pub const PROJECT_CONFIG_FILE: &str = "spoutgen.toml";

/// spoutgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory discovery
    pub paths: PathsConfig,

    /// Module input assembly
    pub module: ModuleConfig,

    /// Output options
    pub generator: GeneratorConfig,

    /// Declaration deny/allow rules
    pub filter: FilterConfig,

    /// Post-extraction namespace renames
    pub rename: RenameConfig,
}

/// Where to look for the SDK and the sibling source trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Windows SDK installation root
    pub sdk_root: PathBuf,

    /// Versioned include directory under the SDK root
    pub sdk_include_dir: String,

    /// Versioned library directory under the SDK root
    pub sdk_lib_dir: String,

    /// Name of the native Spout source tree, found by upward walk
    pub source_tree: String,

    /// Name of the interop module tree (receives output), found by upward walk
    pub interop_tree: String,

    /// Name of the native build output tree, found by upward walk
    pub build_tree: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            sdk_root: PathBuf::from(r"C:\Program Files (x86)\Windows Kits\10"),
            sdk_include_dir: "Include".to_string(),
            sdk_lib_dir: "Lib".to_string(),
            source_tree: "Spout2".to_string(),
            interop_tree: "SpoutDX".to_string(),
            build_tree: "BUILD".to_string(),
        }
    }
}

/// Inputs for the module descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Module name
    pub name: String,

    /// Header directories, relative to the source tree
    pub header_dirs: Vec<PathBuf>,

    /// Source directories, relative to the source tree
    pub source_dirs: Vec<PathBuf>,

    /// Extensions (without dot) that select header files
    pub header_extensions: Vec<String>,

    /// Extensions (without dot) that select source files
    pub source_extensions: Vec<String>,

    /// Header directory inside `<sdk>/<include>/<version>`
    pub sdk_header_subdir: PathBuf,

    /// Individual SDK headers added after the scanned ones
    pub sdk_headers: Vec<String>,

    /// Library directory inside `<sdk>/<lib>/<version>`
    pub sdk_library_subdir: PathBuf,

    /// Library directories, relative to the build tree
    pub build_library_dirs: Vec<PathBuf>,

    /// Libraries to link
    pub libraries: Vec<String>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        ModuleConfig {
            name: "SpoutDX".to_string(),
            header_dirs: vec![
                PathBuf::from("SPOUTSDK/SpoutDirectX/SpoutDX"),
                PathBuf::from("SPOUTSDK/SpoutGL"),
            ],
            source_dirs: vec![PathBuf::from("SPOUTSDK/SpoutDirectX/SpoutDX")],
            header_extensions: vec!["h".to_string(), "hpp".to_string()],
            source_extensions: vec!["cpp".to_string()],
            sdk_header_subdir: PathBuf::from("um"),
            sdk_headers: vec!["d3d11.h".to_string()],
            sdk_library_subdir: PathBuf::from("um/x64"),
            build_library_dirs: vec![PathBuf::from("Binaries/x64")],
            libraries: vec!["Spout.lib".to_string(), "SpoutDX.lib".to_string()],
        }
    }
}

/// Output options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output directory (defaults to the interop tree)
    pub output_dir: Option<PathBuf>,

    /// Compile the generated code
    pub compile_code: bool,

    /// `file-per-module` or `file-per-unit`
    pub output_mode: OutputMode,

    /// Generate finalizers for wrapped native resources
    pub generate_finalizers: bool,

    /// Debug symbols and debug output
    pub debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_dir: None,
            compile_code: false,
            output_mode: OutputMode::FilePerModule,
            generate_finalizers: true,
            debug: true,
        }
    }
}

impl GeneratorConfig {
    /// Resolve into generator options, writing to `default_output` unless an
    /// output directory is configured.
    pub fn to_options(&self, default_output: &Path) -> GeneratorOptions {
        GeneratorOptions {
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| default_output.to_path_buf()),
            compile_code: self.compile_code,
            output_mode: self.output_mode,
            generate_finalizers: self.generate_finalizers,
            debug: self.debug,
        }
    }
}

/// Deny prefixes and allow overrides for class declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Name prefixes that exclude a class
    pub deny: Vec<String>,

    /// Exact names re-admitted even when a deny prefix matches
    pub allow: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let deny = [
            "ID3D11",
            "ID3D10",
            "_D3D10",
            "BasicString",
            "IProvideClassInfo",
            "ISimpleFrameSite",
            "IPictureDisp",
            "IObjectWithSite",
            "IFont",
            "tagCALPOLESTR",
        ];
        let allow = [
            "ID3D11Device",
            "ID3D11Texture2D",
            "ID3D11DeviceContext",
            "D3D11SHADER_RESOURCE_VIEW_DESC",
            "D3D11UNORDERED_ACCESS_VIEW_DESC",
            "D3D11RENDER_TARGET_VIEW_DESC",
            "SpoutDX",
        ];
        FilterConfig {
            deny: deny.iter().map(|s| s.to_string()).collect(),
            allow: allow.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Namespaces renamed after all passes ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Exact namespace names that collide with the target ecosystem
    pub namespaces: Vec<String>,

    /// Namespace the colliding ones are moved under
    pub qualifier: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        RenameConfig {
            namespaces: vec!["Std".to_string()],
            qualifier: "Spout".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Find and load the configuration for a run starting in `start_dir`.
    ///
    /// An explicit path must exist. Project and global files are optional,
    /// but a file that exists and fails to parse is an error.
    pub fn discover(start_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("using config {}", path.display());
            return Self::load(path);
        }

        if let Some(path) = find_project_config(start_dir) {
            tracing::debug!("using project config {}", path.display());
            return Self::load(&path);
        }

        if let Some(path) = global_config_path().filter(|p| p.is_file()) {
            tracing::debug!("using global config {}", path.display());
            return Self::load(&path);
        }

        Ok(Self::default())
    }
}

/// Find the nearest `spoutgen.toml` at or above `start_dir`.
///
/// The walk starts from the canonical path, so it never visits a directory
/// below the real start. A start that does not exist has no project config.
pub fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    let start = start_dir.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Get the global spoutgen config directory (~/.spoutgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".spoutgen"))
}

/// Get the global config path (~/.spoutgen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}
