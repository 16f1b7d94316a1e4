/// Config file loading and creation for the frozenboard CLI.
///
/// Config lives at ~/.config/frozenboard/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Default)]
pub struct FrozenboardConfig {
    pub format: Option<OutputFormat>,
    pub verbose: Option<bool>,
    pub input: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# frozenboard configuration
# All values here can be overridden by CLI flags.

# Output format: \"text\" (scoreboard lines) or \"json\" (one object per command)
# format = \"text\"

# Log every scroll step and print a summary to stderr
# verbose = false

# Read commands from this file instead of stdin
# input = \"/path/to/contest.txt\"
";

/// Returns the default config path: ~/.config/frozenboard/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("frozenboard").join("config.toml")
}

/// Parse config text.
pub fn parse_config(content: &str) -> Result<FrozenboardConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> FrozenboardConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FrozenboardConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Write the default template to `path`, creating parent directories.
/// Fails with `AlreadyExists` if the file is already there.
pub fn write_default_config(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();
    match write_default_config(&path) {
        Ok(()) => path,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            bail(format!("Config file already exists at {}", path.display()))
        }
        Err(e) => bail(format!("Failed to write config to {}: {e}", path.display())),
    }
}
