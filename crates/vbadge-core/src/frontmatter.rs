//! Note frontmatter and the badge overrides it can carry.
//!
//! A note that declares a URL can restyle that URL's badge:
//! ```markdown
//! ---
//! url: https://example.com/article
//! web-badge-color: "#00FF00"
//! web-badge-message: "READ"
//! ---
//! ```

use serde_json::Value;
use std::collections::HashMap;

use crate::badge::BadgePatch;
use crate::error::BadgeError;

/// Overrides the badge background color. Passed through unvalidated.
pub const BADGE_COLOR_KEY: &str = "web-badge-color";

/// Overrides both badge text and title.
pub const BADGE_MESSAGE_KEY: &str = "web-badge-message";

/// Open mapping of frontmatter keys to values.
pub type Frontmatter = HashMap<String, Value>;

/// Split a markdown file into frontmatter YAML and body content.
///
/// Returns `(yaml_str, body)` where `yaml_str` is the raw YAML between
/// `---` delimiters and `body` is everything after the closing `---`.
///
/// # Errors
///
/// Returns [`BadgeError::Decode`] if the file opens a frontmatter block
/// but never closes it.
pub fn split_frontmatter(content: &str) -> Result<Option<(&str, &str)>, BadgeError> {
    let content = content.trim_start_matches('\u{feff}');

    if !content.starts_with("---") {
        return Ok(None);
    }

    let after_first = &content[3..];
    let after_first = after_first.trim_start_matches(['\r', '\n']);

    // Empty block: the closing delimiter follows the opener directly.
    if let Some(rest) = after_first.strip_prefix("---") {
        return Ok(Some(("", rest.trim_start_matches(['\r', '\n']))));
    }

    let close_pos = after_first.find("\n---").ok_or_else(|| {
        BadgeError::Decode("no closing '---' frontmatter delimiter found".to_string())
    })?;

    let yaml = &after_first[..close_pos];
    let rest = &after_first[close_pos + 4..]; // skip \n---

    let body = rest.strip_prefix('\r').unwrap_or(rest);
    let body = body.strip_prefix('\n').unwrap_or(body);

    Ok(Some((yaml, body)))
}

/// Parse the frontmatter of a raw markdown note. A note without a
/// frontmatter block has an empty mapping.
///
/// # Errors
///
/// Returns [`BadgeError::Decode`] if the block is unterminated or is not a
/// YAML mapping.
pub fn parse_markdown_frontmatter(content: &str) -> Result<Frontmatter, BadgeError> {
    let Some((yaml, _body)) = split_frontmatter(content)? else {
        return Ok(Frontmatter::new());
    };
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }
    serde_yaml::from_str(yaml).map_err(|e| BadgeError::Decode(format!("frontmatter: {e}")))
}

/// Badge writes requested by one note's frontmatter.
///
/// The color key sets the background color; the message key sets text and
/// title to the same value. Falsy values (null, `false`, `0`, `""`) count
/// as absent, as do lists and mappings.
#[must_use]
pub fn badge_override(frontmatter: &Frontmatter) -> BadgePatch {
    let message = override_value(frontmatter, BADGE_MESSAGE_KEY);
    BadgePatch {
        background_color: override_value(frontmatter, BADGE_COLOR_KEY),
        text: message.clone(),
        title: message,
    }
}

fn override_value(frontmatter: &Frontmatter, key: &str) -> Option<String> {
    match frontmatter.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}
