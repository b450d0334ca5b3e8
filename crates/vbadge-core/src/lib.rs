//! # vbadge-core
//!
//! Core types for reflecting vault mentions of a URL onto a browser
//! toolbar badge.
//!
//! This crate defines the foundational types used across all other vbadge crates:
//! - [`ConnectionSettings`] and the [`SettingsSource`] it is read from
//! - [`MentionRecord`] / [`MentionSet`]: what the vault knows about a URL
//! - [`BadgeState`], [`BadgePatch`] and the [`BadgeSink`] they are written to
//! - [`reconcile`]: the count-based badge policy
//! - Frontmatter parsing and badge overrides ([`frontmatter`])
//! - Error hierarchy ([`BadgeError`])
//! - Collaborator traits ([`MentionFetcher`], [`NoteContentFetcher`])

pub mod badge;
pub mod error;
pub mod fetch;
pub mod frontmatter;
pub mod mention;
pub mod note;
pub mod reconcile;
pub mod settings;

pub use badge::{BadgeBoard, BadgeCall, BadgePatch, BadgeSink, BadgeState, TabId};
pub use error::{BadgeError, Result};
pub use fetch::{MentionFetcher, NoteContentFetcher};
pub use frontmatter::{badge_override, Frontmatter, BADGE_COLOR_KEY, BADGE_MESSAGE_KEY};
pub use mention::{MentionRecord, MentionSet};
pub use note::NoteContent;
pub use reconcile::{
    reconcile, DIRECT_MENTION_COLOR, ERROR_COLOR, ERROR_TEXT, MENTION_COLOR,
};
pub use settings::{ConnectionSettings, SettingsSource, DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT};
