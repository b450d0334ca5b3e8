//! Error badge.

use vbadge_core::{BadgeError, BadgePatch};

use crate::generation::TabBadge;

/// Shows a failed lookup as a red `ERR` badge and logs the cause.
///
/// The title is not touched, so it keeps whatever the failed cycle (or an
/// earlier one) last set. Nothing is retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorBadgePresenter;

impl ErrorBadgePresenter {
    /// Returns whether the error badge was written. Stale navigations
    /// write nothing.
    pub fn present(&self, badge: &TabBadge<'_>, error: &BadgeError) -> bool {
        if error.is_superseded() {
            tracing::debug!(tab = %badge.tab(), "dropping result of superseded navigation");
            return false;
        }

        tracing::error!(tab = %badge.tab(), error = %error, "mention lookup failed");

        match badge.apply(&BadgePatch::error()) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(tab = %badge.tab(), "tab navigated again before the error badge was set");
                false
            }
        }
    }
}
