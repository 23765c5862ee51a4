use std::path::Path;

use anyhow::{Context, Result};
use chatroster_core::CoreConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration that can be loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Engine settings; overrides the `config` object embedded in a script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core: Option<CoreConfig>,

    /// Emit JSON lines instead of text unless `--json` says otherwise
    #[serde(default)]
    pub json: bool,
}

impl CliConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Engine config for a run: the file's `core` section wins over the
    /// script's, and `show_archived` from the command line wins over both.
    pub fn resolve(&self, script_config: Option<&CoreConfig>, show_archived: bool) -> CoreConfig {
        let mut config = self
            .core
            .clone()
            .or_else(|| script_config.cloned())
            .unwrap_or_default();
        if show_archived {
            config.show_archived = true;
        }
        config
    }
}
