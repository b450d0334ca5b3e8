//! # vbadge-pipeline
//!
//! Turns tab navigations into badge updates.
//!
//! For every tab that starts loading a URL, [`TabNavigationWatcher`]:
//! 1. gates the event (settings complete, URL present, loading start),
//! 2. fetches the URL's mentions and sets the count badge,
//! 3. walks the direct mentions in order, letting each note's frontmatter
//!    override color and message ([`FrontmatterOverrideApplier`]),
//! 4. on any failure shows the error badge ([`ErrorBadgePresenter`]).
//!
//! Every badge write is checked against the tab's latest navigation
//! ([`GenerationTracker`]), so a slow lookup never overwrites the badge of
//! a page the user has already left.

pub mod event;
pub mod generation;
pub mod overrides;
pub mod presenter;
pub mod watcher;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use event::{NavigationEvent, LOADING_STATUS};
pub use generation::{Generation, GenerationTracker, TabBadge};
pub use overrides::FrontmatterOverrideApplier;
pub use presenter::ErrorBadgePresenter;
pub use watcher::{CycleOutcome, TabNavigationWatcher};
pub use worker::ServiceWorker;
