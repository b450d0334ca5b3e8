//! Long-lived event subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::event::NavigationEvent;
use crate::watcher::TabNavigationWatcher;

/// Owns the navigation subscription for the life of the process.
///
/// Events are handled concurrently, one task each, with no ordering
/// between them; per-tab consistency comes from the watcher's generations.
pub struct ServiceWorker {
    watcher: Arc<TabNavigationWatcher>,
    registered: AtomicBool,
}

impl ServiceWorker {
    pub fn new(watcher: Arc<TabNavigationWatcher>) -> Self {
        Self {
            watcher,
            registered: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn watcher(&self) -> &Arc<TabNavigationWatcher> {
        &self.watcher
    }

    /// Subscribe to `events`. Only the first call subscribes; later calls
    /// return `None` and drop their receiver.
    ///
    /// The returned task finishes once the channel closes and every
    /// in-flight event has been handled.
    pub fn register(&self, events: mpsc::Receiver<NavigationEvent>) -> Option<JoinHandle<()>> {
        if self
            .registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("navigation listener already registered");
            return None;
        }
        tracing::debug!("navigation listener registered");
        Some(tokio::spawn(dispatch(self.watcher.clone(), events)))
    }
}

async fn dispatch(watcher: Arc<TabNavigationWatcher>, mut events: mpsc::Receiver<NavigationEvent>) {
    let mut tasks = JoinSet::new();

    while let Some(event) = events.recv().await {
        let watcher = watcher.clone();
        tasks.spawn(async move { watcher.handle(event).await });

        while let Some(result) = tasks.try_join_next() {
            if let Err(e) = result {
                tracing::error!(error = %e, "navigation task panicked");
            }
        }
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            tracing::error!(error = %e, "navigation task panicked");
        }
    }
    tracing::debug!("navigation event stream ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{set, ScriptedMentions, ScriptedNotes, StaticSettings};
    use vbadge_core::{BadgeBoard, TabId};

    fn worker(board: Arc<BadgeBoard>) -> ServiceWorker {
        let mentions = ScriptedMentions::default()
            .with("https://a.example/", set(&[], &["a.md"]))
            .with("https://b.example/", set(&[], &["b1.md", "b2.md"]));
        let watcher = TabNavigationWatcher::new(
            Arc::new(StaticSettings::complete()),
            Arc::new(mentions),
            Arc::new(ScriptedNotes::default()),
            board,
        );
        ServiceWorker::new(Arc::new(watcher))
    }

    #[tokio::test]
    async fn registration_is_idempotent() {
        let worker = worker(Arc::new(BadgeBoard::new()));
        let (_tx1, rx1) = mpsc::channel(4);
        let (_tx2, rx2) = mpsc::channel(4);

        assert!(worker.register(rx1).is_some());
        assert!(worker.register(rx2).is_none());
    }

    #[tokio::test]
    async fn events_for_different_tabs_are_all_handled() {
        let board = Arc::new(BadgeBoard::new());
        let worker = worker(board.clone());
        let (tx, rx) = mpsc::channel(8);
        let handle = worker.register(rx).unwrap();

        tx.send(NavigationEvent::loading(TabId(1), "https://a.example/"))
            .await
            .unwrap();
        tx.send(NavigationEvent::loading(TabId(2), "https://b.example/"))
            .await
            .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(board.state(TabId(1)).text.as_deref(), Some("1"));
        assert_eq!(board.state(TabId(2)).text.as_deref(), Some("2"));
    }
}
