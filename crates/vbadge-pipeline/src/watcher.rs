//! Navigation watcher: gate, lookup, reconcile, override.

use std::sync::Arc;

use vbadge_core::{
    reconcile, BadgeSink, ConnectionSettings, MentionFetcher, NoteContentFetcher, Result,
    SettingsSource, TabId,
};

use crate::event::{NavigationEvent, LOADING_STATUS};
use crate::generation::{GenerationTracker, TabBadge};
use crate::overrides::FrontmatterOverrideApplier;
use crate::presenter::ErrorBadgePresenter;

/// How one event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The gate rejected the event; no badge call was made.
    Skipped,
    /// Count badge set and `overrides` notes restyled it.
    Reconciled { overrides: usize },
    /// The error badge was shown.
    Errored,
    /// A newer navigation of the tab took over; remaining writes dropped.
    Superseded,
    /// The tab was closed.
    Closed,
}

/// Reacts to tab events by keeping each tab's badge in sync with the vault.
pub struct TabNavigationWatcher {
    settings: Arc<dyn SettingsSource>,
    mentions: Arc<dyn MentionFetcher>,
    overrides: FrontmatterOverrideApplier,
    presenter: ErrorBadgePresenter,
    badge: Arc<dyn BadgeSink>,
    generations: GenerationTracker,
}

impl TabNavigationWatcher {
    pub fn new(
        settings: Arc<dyn SettingsSource>,
        mentions: Arc<dyn MentionFetcher>,
        notes: Arc<dyn NoteContentFetcher>,
        badge: Arc<dyn BadgeSink>,
    ) -> Self {
        Self {
            settings,
            mentions,
            overrides: FrontmatterOverrideApplier::new(notes),
            presenter: ErrorBadgePresenter,
            badge,
            generations: GenerationTracker::new(),
        }
    }

    #[must_use]
    pub fn generations(&self) -> &GenerationTracker {
        &self.generations
    }

    /// Handle one event. Never fails: every error ends in the error badge
    /// or a log line.
    pub async fn handle(&self, event: NavigationEvent) -> CycleOutcome {
        match event {
            NavigationEvent::Removed { tab_id } => {
                self.generations.forget(tab_id);
                self.badge.forget(tab_id);
                tracing::debug!(tab = %tab_id, "tab closed");
                CycleOutcome::Closed
            }
            NavigationEvent::Updated {
                tab_id,
                status,
                url,
            } => {
                let Some((settings, url)) = self.gate(tab_id, status.as_deref(), url).await
                else {
                    return CycleOutcome::Skipped;
                };
                self.run_cycle(tab_id, &settings, &url).await
            }
        }
    }

    /// Decide whether an update warrants a lookup. Settings are read anew
    /// each time.
    async fn gate(
        &self,
        tab: TabId,
        status: Option<&str>,
        url: Option<String>,
    ) -> Option<(ConnectionSettings, String)> {
        if status != Some(LOADING_STATUS) {
            tracing::trace!(tab = %tab, status, "ignoring non-loading update");
            return None;
        }
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            tracing::debug!(tab = %tab, "ignoring navigation without URL");
            return None;
        };

        let settings = match self.settings.load().await {
            Ok(Some(settings)) if settings.is_complete() => settings,
            Ok(_) => {
                tracing::debug!(tab = %tab, "vault connection not configured, skipping lookup");
                return None;
            }
            Err(e) => {
                tracing::warn!(tab = %tab, error = %e, "could not read settings, skipping lookup");
                return None;
            }
        };
        Some((settings, url))
    }

    async fn run_cycle(&self, tab: TabId, settings: &ConnectionSettings, url: &str) -> CycleOutcome {
        let generation = self.generations.begin(tab);
        let badge = TabBadge::new(self.badge.as_ref(), &self.generations, generation);

        match self.reconcile_tab(&badge, settings, url).await {
            Ok(overrides) => {
                tracing::info!(tab = %tab, url, overrides, "badge reconciled");
                CycleOutcome::Reconciled { overrides }
            }
            Err(e) if e.is_superseded() => {
                self.presenter.present(&badge, &e);
                CycleOutcome::Superseded
            }
            Err(e) => {
                if self.presenter.present(&badge, &e) {
                    CycleOutcome::Errored
                } else {
                    CycleOutcome::Superseded
                }
            }
        }
    }

    async fn reconcile_tab(
        &self,
        badge: &TabBadge<'_>,
        settings: &ConnectionSettings,
        url: &str,
    ) -> Result<usize> {
        let mentions = self.mentions.fetch_mentions(settings, url).await?;
        tracing::debug!(
            tab = %badge.tab(),
            direct = mentions.direct.len(),
            mentions = mentions.mentions.len(),
            "mentions fetched"
        );

        badge.apply(&reconcile(&mentions))?;
        self.overrides
            .apply(settings, &mentions.direct, badge)
            .await
    }
}
