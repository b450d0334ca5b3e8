//! Mention types: notes in the vault that reference a URL.

use serde::{Deserialize, Serialize};

/// A note that mentions the current URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Vault-relative path of the note (e.g., "reading/article.md").
    pub filename: String,
}

impl MentionRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Everything the vault returned for one URL.
///
/// `direct` holds notes that declare the URL in their frontmatter and
/// outranks `mentions`, which holds notes that merely contain it. Both keep
/// the order the vault returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSet {
    #[serde(default)]
    pub direct: Vec<MentionRecord>,
    #[serde(default)]
    pub mentions: Vec<MentionRecord>,
}

impl MentionSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.mentions.is_empty()
    }
}
