//! Host runtime capabilities the broker relies on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vbadge_core::{Result, TabId};

/// Command name the browser binds to the toolbar action.
pub const EXECUTE_ACTION_COMMAND: &str = "_execute_action";

/// A registered extension command and its (possibly unset) shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBinding {
    pub name: String,
    #[serde(default)]
    pub shortcut: Option<String>,
}

/// Permission and command queries. Each call resolves exactly once.
#[async_trait]
pub trait ExtensionRuntime: Send + Sync {
    /// Whether every origin pattern is already granted.
    async fn contains_origins(&self, origins: &[String]) -> bool;

    /// Prompt for the origin patterns; resolves to the grant result.
    async fn request_origins(&self, origins: &[String]) -> bool;

    async fn commands(&self) -> Vec<CommandBinding>;
}

/// Injects script files into a tab.
#[async_trait]
pub trait ScriptInjector: Send + Sync {
    async fn inject(&self, tab: TabId, files: &[&str]) -> Result<()>;
}
