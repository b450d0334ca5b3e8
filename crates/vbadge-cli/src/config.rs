//! Application config file.
//!
//! ```toml
//! [vault]
//! https_port = 27124
//! ca_certificate = "~/.config/vbadge/vault.crt"
//!
//! [runtime]
//! granted_origins = ["http://127.0.0.1:27123/*", "https://127.0.0.1:27124/*"]
//! action_shortcut = "Ctrl+Shift+O"
//! grant_on_request = true
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use vbadge_vault::VaultClientConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vault: VaultClientConfig,
    pub runtime: RuntimeConfig,
}

/// Stand-in for the browser's permission and command state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub granted_origins: Vec<String>,
    pub action_shortcut: Option<String>,
    /// Answer permission prompts with a grant.
    pub grant_on_request: bool,
}

impl AppConfig {
    /// Read the config file, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }
}
