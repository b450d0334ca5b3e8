//! Messages between the popup and the background worker.

use serde::{Deserialize, Serialize};

/// A request from the popup, e.g.
/// `{"type": "check-has-host-permission", "host": "127.0.0.1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BackgroundRequest {
    CheckHasHostPermission {
        #[serde(default)]
        host: Option<String>,
    },
    RequestHostPermission {
        #[serde(default)]
        host: Option<String>,
    },
    CheckKeyboardShortcut,
}

/// The single reply to a [`BackgroundRequest`]. Serializes as a bare JSON
/// boolean, string, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrokerReply {
    Granted(bool),
    Shortcut(Option<String>),
}
