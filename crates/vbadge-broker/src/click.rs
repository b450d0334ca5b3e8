//! Toolbar icon clicks.

use std::sync::Arc;

use vbadge_core::TabId;

use crate::runtime::ScriptInjector;

/// Scripts that make up the popup UI, injected in this order.
pub const POPUP_BUNDLE: [&str; 2] = ["js/vendor.js", "js/popup.js"];

pub struct ActionClickHandler {
    injector: Arc<dyn ScriptInjector>,
}

impl ActionClickHandler {
    pub fn new(injector: Arc<dyn ScriptInjector>) -> Self {
        Self { injector }
    }

    /// Inject the popup into the clicked tab. Returns whether injection
    /// succeeded; a click without a tab is only logged.
    pub async fn on_clicked(&self, tab: Option<TabId>) -> bool {
        let Some(tab) = tab else {
            tracing::info!("No tab ID");
            return false;
        };
        match self.injector.inject(tab, &POPUP_BUNDLE).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(tab = %tab, error = %e, "popup injection failed");
                false
            }
        }
    }
}
