//! Terminal stand-ins for the browser host.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use vbadge_broker::{CommandBinding, ExtensionRuntime, ScriptInjector, EXECUTE_ACTION_COMMAND};
use vbadge_core::{BadgeCall, BadgeSink, Result, TabId};

use crate::config::RuntimeConfig;

#[derive(Serialize)]
struct StampedCall<'a> {
    at: DateTime<Utc>,
    #[serde(flatten)]
    call: &'a BadgeCall,
}

fn stamped_line(call: &BadgeCall) -> serde_json::Result<String> {
    serde_json::to_string(&StampedCall {
        at: Utc::now(),
        call,
    })
}

/// Echoes each badge call as a JSON line on stdout. Keeps no state, so a
/// long `watch` session does not accumulate anything per tab.
#[derive(Debug, Default)]
pub struct JsonLinesBadge;

impl JsonLinesBadge {
    fn echo(&self, call: BadgeCall) {
        match stamped_line(&call) {
            Ok(json) => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = writeln!(out, "{json}") {
                    tracing::warn!(error = %e, "failed to write badge call");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode badge call"),
        }
    }
}

impl BadgeSink for JsonLinesBadge {
    fn set_background_color(&self, tab: TabId, color: &str) {
        self.echo(BadgeCall::SetBadgeBackgroundColor {
            tab_id: tab,
            color: color.to_string(),
        });
    }

    fn set_text(&self, tab: TabId, text: &str) {
        self.echo(BadgeCall::SetBadgeText {
            tab_id: tab,
            text: text.to_string(),
        });
    }

    fn set_title(&self, tab: TabId, title: &str) {
        self.echo(BadgeCall::SetTitle {
            tab_id: tab,
            title: title.to_string(),
        });
    }
}

/// Permission and command state taken from the `[runtime]` config table.
pub struct ConfigRuntime {
    granted: Mutex<Vec<String>>,
    shortcut: Option<String>,
    grant_on_request: bool,
}

impl ConfigRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            granted: Mutex::new(config.granted_origins),
            shortcut: config.action_shortcut,
            grant_on_request: config.grant_on_request,
        }
    }
}

#[async_trait]
impl ExtensionRuntime for ConfigRuntime {
    async fn contains_origins(&self, origins: &[String]) -> bool {
        let granted = self.granted.lock().unwrap_or_else(PoisonError::into_inner);
        origins.iter().all(|o| granted.contains(o))
    }

    async fn request_origins(&self, origins: &[String]) -> bool {
        if self.grant_on_request {
            self.granted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(origins.iter().cloned());
        }
        self.grant_on_request
    }

    async fn commands(&self) -> Vec<CommandBinding> {
        vec![CommandBinding {
            name: EXECUTE_ACTION_COMMAND.to_string(),
            shortcut: self.shortcut.clone(),
        }]
    }
}

/// Logs injections instead of performing them.
pub struct LoggingInjector;

#[async_trait]
impl ScriptInjector for LoggingInjector {
    async fn inject(&self, tab: TabId, files: &[&str]) -> Result<()> {
        tracing::info!(tab = %tab, files = ?files, "injecting popup");
        Ok(())
    }
}
