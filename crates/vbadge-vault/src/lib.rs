//! # vbadge-vault
//!
//! Talks to the note vault's REST API.
//!
//! The vault is the only source of truth about mentions. This crate
//! provides [`VaultClient`], which implements both lookup collaborators
//! from `vbadge-core` over HTTP, and [`FileSettingsStore`], which reads the
//! connection settings a user saved.

pub mod client;
pub mod config;
pub mod search;
pub mod settings;

pub use client::{note_path, VaultClient, NOTE_JSON_MEDIA_TYPE};
pub use config::VaultClientConfig;
pub use search::{direct_mention_query, mention_query, SearchHit, JSONLOGIC_MEDIA_TYPE};
pub use settings::FileSettingsStore;
