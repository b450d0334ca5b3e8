//! Per-tab navigation generations.
//!
//! Lookups are never cancelled, so two lookups for the same tab can be in
//! flight at once. Each navigation takes a fresh generation when it passes
//! the gate; only the holder of a tab's latest generation may write to
//! that tab's badge.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use vbadge_core::{BadgeError, BadgePatch, BadgeSink, Result, TabId};

/// Ticket for one navigation of one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub tab: TabId,
    pub number: u64,
}

#[derive(Debug, Default)]
pub struct GenerationTracker {
    next: AtomicU64,
    latest: Mutex<HashMap<TabId, u64>>,
}

impl GenerationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new navigation of `tab`, superseding any earlier one.
    pub fn begin(&self, tab: TabId) -> Generation {
        let mut latest = self.lock();
        let number = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        latest.insert(tab, number);
        Generation { tab, number }
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.lock().get(&generation.tab) == Some(&generation.number)
    }

    /// Write `patch` to `sink` only if `generation` is still the tab's
    /// latest. The lock is held across every sink call, so `begin` and
    /// `forget` cannot interleave with a partially applied patch.
    ///
    /// # Errors
    ///
    /// Returns [`BadgeError::Superseded`] without writing anything when the
    /// generation is stale.
    pub fn apply_if_current(
        &self,
        generation: Generation,
        patch: &BadgePatch,
        sink: &dyn BadgeSink,
    ) -> Result<()> {
        let latest = self.lock();
        if latest.get(&generation.tab) != Some(&generation.number) {
            return Err(BadgeError::Superseded(generation.tab));
        }
        patch.apply(generation.tab, sink);
        Ok(())
    }

    /// Drop a closed tab. Lookups still running for it become stale.
    pub fn forget(&self, tab: TabId) {
        self.lock().remove(&tab);
    }

    #[must_use]
    pub fn tracked_tabs(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TabId, u64>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Write access to one tab's badge for the duration of one navigation.
pub struct TabBadge<'a> {
    sink: &'a dyn BadgeSink,
    tracker: &'a GenerationTracker,
    generation: Generation,
}

impl<'a> TabBadge<'a> {
    pub fn new(sink: &'a dyn BadgeSink, tracker: &'a GenerationTracker, generation: Generation) -> Self {
        Self {
            sink,
            tracker,
            generation,
        }
    }

    #[must_use]
    pub fn tab(&self) -> TabId {
        self.generation.tab
    }

    /// Write `patch` to the tab if this navigation is still the latest.
    ///
    /// # Errors
    ///
    /// Returns [`BadgeError::Superseded`] without writing anything when a
    /// newer navigation of the tab has begun or the tab was closed.
    pub fn apply(&self, patch: &BadgePatch) -> Result<()> {
        self.tracker
            .apply_if_current(self.generation, patch, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use vbadge_core::BadgeBoard;

    fn text(t: &str) -> BadgePatch {
        BadgePatch {
            text: Some(t.to_string()),
            ..BadgePatch::default()
        }
    }

    #[test]
    fn newer_navigation_supersedes_older() {
        let tracker = GenerationTracker::new();
        let first = tracker.begin(TabId(1));
        let second = tracker.begin(TabId(1));

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second.number > first.number);
    }

    #[test]
    fn tabs_do_not_supersede_each_other() {
        let tracker = GenerationTracker::new();
        let a = tracker.begin(TabId(1));
        let b = tracker.begin(TabId(2));
        assert!(tracker.is_current(a));
        assert!(tracker.is_current(b));
        assert_eq!(tracker.tracked_tabs(), 2);
    }

    #[test]
    fn stale_badge_writes_are_refused() {
        let board = BadgeBoard::new();
        let tracker = GenerationTracker::new();
        let stale = TabBadge::new(&board, &tracker, tracker.begin(TabId(4)));
        let fresh = TabBadge::new(&board, &tracker, tracker.begin(TabId(4)));

        fresh.apply(&text("fresh")).unwrap();
        let err = stale.apply(&text("stale")).unwrap_err();

        assert!(err.is_superseded());
        assert_eq!(board.state(TabId(4)).text.as_deref(), Some("fresh"));
        assert_eq!(board.calls().len(), 1);
    }

    /// Sink that, on its first color write, starts a newer navigation of
    /// the same tab on another thread and has it write a full badge.
    struct Interrupting {
        board: Arc<BadgeBoard>,
        tracker: Arc<GenerationTracker>,
        newer: Mutex<Option<thread::JoinHandle<()>>>,
    }

    impl BadgeSink for Interrupting {
        fn set_background_color(&self, tab: TabId, color: &str) {
            self.board.set_background_color(tab, color);
            let mut newer = self.newer.lock().unwrap();
            if newer.is_none() {
                let board = self.board.clone();
                let tracker = self.tracker.clone();
                *newer = Some(thread::spawn(move || {
                    let generation = tracker.begin(tab);
                    let patch = BadgePatch {
                        background_color: Some("#FRESH0".to_string()),
                        text: Some("fresh".to_string()),
                        title: Some("fresh".to_string()),
                    };
                    tracker
                        .apply_if_current(generation, &patch, board.as_ref())
                        .unwrap();
                }));
                // Give the newer navigation a chance to race the rest of
                // this patch.
                drop(newer);
                thread::sleep(Duration::from_millis(50));
            }
        }

        fn set_text(&self, tab: TabId, text: &str) {
            self.board.set_text(tab, text);
        }

        fn set_title(&self, tab: TabId, title: &str) {
            self.board.set_title(tab, title);
        }
    }

    #[test]
    fn newer_navigation_cannot_interleave_with_a_patch() {
        let board = Arc::new(BadgeBoard::new());
        let tracker = Arc::new(GenerationTracker::new());
        let sink = Interrupting {
            board: board.clone(),
            tracker: tracker.clone(),
            newer: Mutex::new(None),
        };
        let stale = tracker.begin(TabId(5));
        let patch = BadgePatch {
            background_color: Some("#000000".to_string()),
            text: Some("stale".to_string()),
            title: Some("stale".to_string()),
        };

        tracker.apply_if_current(stale, &patch, &sink).unwrap();
        let newer = sink.newer.lock().unwrap().take().unwrap();
        newer.join().unwrap();

        let state = board.state(TabId(5));
        assert_eq!(state.background_color.as_deref(), Some("#FRESH0"));
        assert_eq!(state.text.as_deref(), Some("fresh"));
        assert_eq!(state.title.as_deref(), Some("fresh"));
        assert!(!tracker.is_current(stale));
    }

    #[test]
    fn forgotten_tab_refuses_writes() {
        let board = BadgeBoard::new();
        let tracker = GenerationTracker::new();
        let badge = TabBadge::new(&board, &tracker, tracker.begin(TabId(8)));

        tracker.forget(TabId(8));
        assert!(badge.apply(&text("late")).is_err());
        assert!(board.calls().is_empty());
        assert_eq!(tracker.tracked_tabs(), 0);
    }
}
