//! Note content as served by the vault's note-with-metadata representation.

use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// A vault note with its parsed metadata. Only `frontmatter` is required
/// on the wire; everything else defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteContent {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content: String,
    pub frontmatter: Frontmatter,
    #[serde(default)]
    pub tags: Vec<String>,
}
