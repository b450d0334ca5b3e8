//! Frontmatter badge overrides.

use std::sync::Arc;

use vbadge_core::{badge_override, ConnectionSettings, MentionRecord, NoteContentFetcher, Result};

use crate::generation::TabBadge;

/// Lets notes that declare a URL restyle its badge.
///
/// Notes are fetched one at a time in the order given; when several notes
/// set the same field, the last one wins. A failed fetch stops the walk and
/// leaves whatever earlier notes already wrote.
#[derive(Clone)]
pub struct FrontmatterOverrideApplier {
    notes: Arc<dyn NoteContentFetcher>,
}

impl FrontmatterOverrideApplier {
    pub fn new(notes: Arc<dyn NoteContentFetcher>) -> Self {
        Self { notes }
    }

    /// Apply the overrides of every note in `direct`, returning how many
    /// notes carried at least one.
    ///
    /// # Errors
    ///
    /// The first fetch or decode failure, or [`vbadge_core::BadgeError::Superseded`]
    /// once a newer navigation owns the tab.
    pub async fn apply(
        &self,
        settings: &ConnectionSettings,
        direct: &[MentionRecord],
        badge: &TabBadge<'_>,
    ) -> Result<usize> {
        let mut applied = 0;
        for record in direct {
            let note = self.notes.fetch_note(settings, &record.filename).await?;
            let patch = badge_override(&note.frontmatter);
            if patch.is_empty() {
                continue;
            }
            tracing::debug!(
                tab = %badge.tab(),
                note = %record.filename,
                color = patch.background_color.as_deref(),
                message = patch.text.as_deref(),
                "applying frontmatter badge override"
            );
            badge.apply(&patch)?;
            applied += 1;
        }
        Ok(applied)
    }
}
