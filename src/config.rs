//! Generator configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Stock defaults ([`GeneratorConfig::default`])
//! 2. An optional TOML file passed with `--config`
//! 3. Command-line flags
//!
//! ## Config File
//!
//! ```toml
//! # All keys are optional - defaults shown below
//!
//! pubsub_dir = "gen/proto/infra/pubsub"   # Directory scanned for inputs
//! glob = "*.pubsub.proto"                 # Pattern within pubsub_dir
//! # output_dir = "deploy/pubsub/schemas"  # Required here or via --output-dir
//! on_duplicate = "overwrite"              # "overwrite" or "error"
//! ```
//!
//! The file is sparse: missing keys keep their stock defaults, so it only
//! needs the values it changes. Unknown keys are rejected to catch typos.
//! Relative paths resolve against the working directory, like flags do.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PUBSUB_DIR: &str = "gen/proto/infra/pubsub";
pub const DEFAULT_GLOB: &str = "*.pubsub.proto";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Syntax error, unknown key or bad value. `message` is a single line.
    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("config validation error: {0}")]
    Validation(String),
    #[error("missing required flag: --output-dir")]
    MissingOutputDir,
}

/// What to do when two inputs derive the same resource name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Last writer wins; a warning names both inputs.
    #[default]
    Overwrite,
    /// Abort before touching the output directory.
    Error,
}

/// Settings as read from defaults and the config file.
///
/// `output_dir` stays optional at this layer because the flag may supply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub pubsub_dir: PathBuf,
    pub glob: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub on_duplicate: DuplicatePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pubsub_dir: PathBuf::from(DEFAULT_PUBSUB_DIR),
            glob: DEFAULT_GLOB.to_string(),
            output_dir: None,
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pubsub_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("pubsub_dir must not be empty".into()));
        }
        if self.glob.trim().is_empty() {
            return Err(ConfigError::Validation("glob must not be empty".into()));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of this config.
    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.pubsub_dir {
            self.pubsub_dir = dir;
        }
        if let Some(glob) = overrides.glob {
            self.glob = glob;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = Some(dir);
        }
        if overrides.deny_duplicates {
            self.on_duplicate = DuplicatePolicy::Error;
        }
        self
    }

    /// Finalize into run settings. Fails if no output directory was given.
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        self.validate()?;
        let output_dir = self
            .output_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(ConfigError::MissingOutputDir)?;
        Ok(Settings {
            pubsub_dir: self.pubsub_dir,
            glob: self.glob,
            output_dir,
            on_duplicate: self.on_duplicate,
        })
    }
}

/// Values supplied on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub pubsub_dir: Option<PathBuf>,
    pub glob: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub deny_duplicates: bool,
}

/// Fully resolved settings for one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pubsub_dir: PathBuf,
    pub glob: String,
    pub output_dir: PathBuf,
    pub on_duplicate: DuplicatePolicy,
}

/// Parse config file contents. Missing keys take their defaults.
pub fn parse_config(path: &Path, content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: describe_toml_error(content, &err),
        })?;
    config.validate()?;
    Ok(config)
}

/// Render a TOML error as `line L, column C: message` on one line.
///
/// The toml crate's `Display` draws a multi-line source excerpt, which does
/// not fit the single `error:` line the CLI prints.
fn describe_toml_error(content: &str, err: &toml::de::Error) -> String {
    let message = err
        .message()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let Some(span) = err.span() else {
        return message;
    };
    let before = content.get(..span.start).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    format!("line {line}, column {column}: {message}")
}

/// Load the config layer: stock defaults, or `path` parsed over them.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &content)
}

/// A fully commented stock config file, printed by `--print-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# pubsubschema-gen configuration
# ==============================
# Pass this file with --config. All keys are optional; values shown are the
# defaults. Command-line flags override anything set here. Relative paths
# resolve against the working directory, not this file.

# Directory scanned for input files.
pubsub_dir = "gen/proto/infra/pubsub"

# Glob pattern, relative to pubsub_dir, selecting the input files.
# Each match must be named <identifier>.pubsub.proto.
glob = "*.pubsub.proto"

# Directory that receives <name>.schema.yaml files and kustomization.yaml.
# Required either here or through --output-dir. Every *.schema.yaml already
# in this directory is deleted at the start of a run.
# output_dir = "deploy/pubsub/schemas"

# Two inputs can derive the same resource name, e.g. foo_bar.pubsub.proto
# and foo.bar.pubsub.proto both become foo-bar.
#   "overwrite" - the later input (in sorted order) wins, with a warning
#   "error"     - fail before anything in output_dir is touched
on_duplicate = "overwrite"
"#
}
