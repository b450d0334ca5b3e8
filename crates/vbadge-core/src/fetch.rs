//! Collaborators that talk to the vault.

use async_trait::async_trait;

use crate::error::Result;
use crate::mention::MentionSet;
use crate::note::NoteContent;
use crate::settings::ConnectionSettings;

/// Looks up which notes mention a URL.
#[async_trait]
pub trait MentionFetcher: Send + Sync {
    /// # Errors
    ///
    /// Fails with [`crate::BadgeError::Transport`] or
    /// [`crate::BadgeError::Http`] when the vault cannot be reached or
    /// answers with an error status.
    async fn fetch_mentions(&self, settings: &ConnectionSettings, url: &str) -> Result<MentionSet>;
}

/// Reads one note, frontmatter included.
#[async_trait]
pub trait NoteContentFetcher: Send + Sync {
    /// `filename` is the vault-relative path from a [`crate::MentionRecord`].
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-2xx statuses, or an undecodable body.
    async fn fetch_note(&self, settings: &ConnectionSettings, filename: &str)
        -> Result<NoteContent>;
}
