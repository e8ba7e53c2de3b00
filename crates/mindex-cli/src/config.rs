use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mindex_codec::CompactorConfig;
use serde::{Deserialize, Serialize};

/// Settings for the `mindex` binary, loadable from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory that input and output names resolve against.
    pub base_dir: PathBuf,
    /// Reject artifact records lacking identity fields when compacting.
    pub strict_identity: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            strict_identity: false,
            pretty: false,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn compactor_config(&self) -> CompactorConfig {
        CompactorConfig {
            validate_identity: self.strict_identity,
        }
    }
}
