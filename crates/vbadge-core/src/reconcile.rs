//! Count-based badge policy.
//!
//! Maps a [`MentionSet`] to the tab's initial badge. First matching rule wins:
//!
//! | Condition            | Color                    | Text / Title            |
//! |----------------------|--------------------------|-------------------------|
//! | any direct mention   | [`DIRECT_MENTION_COLOR`] | `n` / `"n mentions"`    |
//! | any other mention    | [`MENTION_COLOR`]        | `n` / `"n mentions"`    |
//! | nothing              | untouched                | `""` / `""`             |

use crate::badge::BadgePatch;
use crate::mention::MentionSet;

/// Amber, for notes that declare the URL.
pub const DIRECT_MENTION_COLOR: &str = "#A68B36";

/// Blue, for notes that only contain the URL.
pub const MENTION_COLOR: &str = "#3D7D98";

pub const ERROR_COLOR: &str = "#FF0000";

pub const ERROR_TEXT: &str = "ERR";

/// Compute the initial badge for a mention set.
#[must_use]
pub fn reconcile(mentions: &MentionSet) -> BadgePatch {
    if !mentions.direct.is_empty() {
        counted(DIRECT_MENTION_COLOR, mentions.direct.len())
    } else if !mentions.mentions.is_empty() {
        counted(MENTION_COLOR, mentions.mentions.len())
    } else {
        BadgePatch {
            background_color: None,
            text: Some(String::new()),
            title: Some(String::new()),
        }
    }
}

fn counted(color: &str, count: usize) -> BadgePatch {
    BadgePatch {
        background_color: Some(color.to_string()),
        text: Some(count.to_string()),
        title: Some(format!("{count} mentions")),
    }
}

impl BadgePatch {
    /// The fixed failure badge. Title is left as it was.
    #[must_use]
    pub fn error() -> Self {
        Self {
            background_color: Some(ERROR_COLOR.to_string()),
            text: Some(ERROR_TEXT.to_string()),
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::MentionRecord;
    use proptest::prelude::*;

    fn records(n: usize) -> Vec<MentionRecord> {
        (0..n).map(|i| MentionRecord::new(format!("note-{i}.md"))).collect()
    }

    #[test]
    fn direct_mentions_get_amber_count() {
        let set = MentionSet {
            direct: records(2),
            mentions: records(5),
        };
        let patch = reconcile(&set);
        assert_eq!(patch.background_color.as_deref(), Some("#A68B36"));
        assert_eq!(patch.text.as_deref(), Some("2"));
        assert_eq!(patch.title.as_deref(), Some("2 mentions"));
    }

    #[test]
    fn single_mention_title_is_not_singularized() {
        let set = MentionSet {
            direct: vec![],
            mentions: records(1),
        };
        let patch = reconcile(&set);
        assert_eq!(patch.background_color.as_deref(), Some("#3D7D98"));
        assert_eq!(patch.title.as_deref(), Some("1 mentions"));
    }

    #[test]
    fn no_mentions_clears_text_and_title_but_not_color() {
        let patch = reconcile(&MentionSet::default());
        assert_eq!(patch.background_color, None);
        assert_eq!(patch.text.as_deref(), Some(""));
        assert_eq!(patch.title.as_deref(), Some(""));
    }

    #[test]
    fn error_badge_leaves_title_alone() {
        let patch = BadgePatch::error();
        assert_eq!(patch.background_color.as_deref(), Some("#FF0000"));
        assert_eq!(patch.text.as_deref(), Some("ERR"));
        assert_eq!(patch.title, None);
    }

    proptest! {
        #[test]
        fn direct_count_wins_regardless_of_mentions(d in 1usize..200, m in 0usize..200) {
            let patch = reconcile(&MentionSet { direct: records(d), mentions: records(m) });
            prop_assert_eq!(patch.background_color.as_deref(), Some(DIRECT_MENTION_COLOR));
            prop_assert_eq!(patch.text, Some(d.to_string()));
            prop_assert_eq!(patch.title, Some(format!("{d} mentions")));
        }

        #[test]
        fn aggregate_count_used_without_direct(m in 1usize..200) {
            let patch = reconcile(&MentionSet { direct: vec![], mentions: records(m) });
            prop_assert_eq!(patch.background_color.as_deref(), Some(MENTION_COLOR));
            prop_assert_eq!(patch.text, Some(m.to_string()));
        }

        #[test]
        fn text_always_parses_as_the_winning_count(d in 0usize..50, m in 0usize..50) {
            let patch = reconcile(&MentionSet { direct: records(d), mentions: records(m) });
            let text = patch.text.unwrap_or_default();
            let expected = if d > 0 { d } else { m };
            if expected == 0 {
                prop_assert!(text.is_empty());
            } else {
                prop_assert_eq!(text.parse::<usize>().ok(), Some(expected));
            }
        }
    }
}
