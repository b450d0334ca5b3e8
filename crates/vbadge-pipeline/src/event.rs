//! Tab events delivered by the host.

use serde::{Deserialize, Serialize};

use vbadge_core::TabId;

/// The only status transition that triggers a lookup.
pub const LOADING_STATUS: &str = "loading";

/// A per-tab notification from the browser.
///
/// Decodes from NDJSON such as
/// `{"event": "updated", "tabId": 3, "status": "loading", "url": "https://..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum NavigationEvent {
    #[serde(rename_all = "camelCase")]
    Updated {
        tab_id: TabId,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Removed { tab_id: TabId },
}

impl NavigationEvent {
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        match self {
            Self::Updated { tab_id, .. } | Self::Removed { tab_id } => *tab_id,
        }
    }

    /// Shorthand for a loading-start event.
    pub fn loading(tab_id: TabId, url: impl Into<String>) -> Self {
        Self::Updated {
            tab_id,
            status: Some(LOADING_STATUS.to_string()),
            url: Some(url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updated_event_decodes_from_host_json() {
        let event: NavigationEvent = serde_json::from_str(
            r#"{"event": "updated", "tabId": 3, "status": "loading", "url": "https://example.com/"}"#,
        )
        .unwrap();
        assert_eq!(event, NavigationEvent::loading(TabId(3), "https://example.com/"));
    }

    #[test]
    fn status_and_url_are_optional() {
        let event: NavigationEvent =
            serde_json::from_str(r#"{"event": "updated", "tabId": 1, "title": "x"}"#).unwrap();
        assert_eq!(
            event,
            NavigationEvent::Updated {
                tab_id: TabId(1),
                status: None,
                url: None
            }
        );
    }

    #[test]
    fn removed_event_decodes() {
        let event: NavigationEvent =
            serde_json::from_str(r#"{"event": "removed", "tabId": 5}"#).unwrap();
        assert_eq!(event.tab_id(), TabId(5));
    }
}
