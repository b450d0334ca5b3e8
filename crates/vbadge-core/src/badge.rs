//! Badge types: the per-tab toolbar indicator.
//!
//! The host exposes color, text and title as three independent setters.
//! Nothing here batches them: a [`BadgePatch`] is applied as a sequence of
//! separate [`BadgeSink`] calls, and the last call wins per field.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Browser tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Badge state of one tab. `None` means the field was never set and the
/// host shows its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The host's badge API. Each call is applied atomically on its own.
pub trait BadgeSink: Send + Sync {
    fn set_background_color(&self, tab: TabId, color: &str);
    fn set_text(&self, tab: TabId, text: &str);
    fn set_title(&self, tab: TabId, title: &str);

    /// The tab was closed; release anything kept for it.
    fn forget(&self, _tab: TabId) {}
}

/// A set of badge field writes. Fields left `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgePatch {
    pub background_color: Option<String>,
    pub text: Option<String>,
    pub title: Option<String>,
}

impl BadgePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.text.is_none() && self.title.is_none()
    }

    /// Issue one sink call per present field: color, then text, then title.
    pub fn apply(&self, tab: TabId, sink: &dyn BadgeSink) {
        if let Some(color) = &self.background_color {
            sink.set_background_color(tab, color);
        }
        if let Some(text) = &self.text {
            sink.set_text(tab, text);
        }
        if let Some(title) = &self.title {
            sink.set_title(tab, title);
        }
    }
}

/// One recorded badge API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum BadgeCall {
    #[serde(rename_all = "camelCase")]
    SetBadgeBackgroundColor { tab_id: TabId, color: String },
    #[serde(rename_all = "camelCase")]
    SetBadgeText { tab_id: TabId, text: String },
    #[serde(rename_all = "camelCase")]
    SetTitle { tab_id: TabId, title: String },
}

impl BadgeCall {
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        match self {
            Self::SetBadgeBackgroundColor { tab_id, .. }
            | Self::SetBadgeText { tab_id, .. }
            | Self::SetTitle { tab_id, .. } => *tab_id,
        }
    }
}

#[derive(Debug, Default)]
struct BoardInner {
    states: HashMap<TabId, BadgeState>,
    calls: Vec<BadgeCall>,
}

/// In-memory badge store: keeps the current state of every tab and a log
/// of every call that produced it.
#[derive(Debug, Default)]
pub struct BadgeBoard {
    inner: Mutex<BoardInner>,
}

impl BadgeBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a tab (all `None` if nothing was ever set).
    #[must_use]
    pub fn state(&self, tab: TabId) -> BadgeState {
        self.lock().states.get(&tab).cloned().unwrap_or_default()
    }

    /// Every call issued so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BadgeCall> {
        self.lock().calls.clone()
    }

    /// Calls issued for one tab, in order.
    #[must_use]
    pub fn calls_for(&self, tab: TabId) -> Vec<BadgeCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.tab_id() == tab)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: BadgeCall) {
        let mut inner = self.lock();
        let state = inner.states.entry(call.tab_id()).or_default();
        match &call {
            BadgeCall::SetBadgeBackgroundColor { color, .. } => {
                state.background_color = Some(color.clone());
            }
            BadgeCall::SetBadgeText { text, .. } => state.text = Some(text.clone()),
            BadgeCall::SetTitle { title, .. } => state.title = Some(title.clone()),
        }
        inner.calls.push(call);
    }
}

impl BadgeSink for BadgeBoard {
    fn set_background_color(&self, tab: TabId, color: &str) {
        self.record(BadgeCall::SetBadgeBackgroundColor {
            tab_id: tab,
            color: color.to_string(),
        });
    }

    fn set_text(&self, tab: TabId, text: &str) {
        self.record(BadgeCall::SetBadgeText {
            tab_id: tab,
            text: text.to_string(),
        });
    }

    fn set_title(&self, tab: TabId, title: &str) {
        self.record(BadgeCall::SetTitle {
            tab_id: tab,
            title: title.to_string(),
        });
    }

    /// Drop the state and call log of a closed tab.
    fn forget(&self, tab: TabId) {
        let mut inner = self.lock();
        inner.states.remove(&tab);
        inner.calls.retain(|c| c.tab_id() != tab);
    }
}
