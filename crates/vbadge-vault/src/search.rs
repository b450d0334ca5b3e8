//! JsonLogic search queries and their results.

use serde::Deserialize;
use serde_json::{json, Value};

use vbadge_core::MentionRecord;

pub const JSONLOGIC_MEDIA_TYPE: &str = "application/vnd.olrapi.jsonlogic+json";

/// Notes that declare `url` in their frontmatter, either as `url` or in
/// the `url-aliases` list.
#[must_use]
pub fn direct_mention_query(url: &str) -> Value {
    json!({
        "or": [
            {"===": [{"var": "frontmatter.url"}, url]},
            {"in": [url, {"var": "frontmatter.url-aliases"}]},
        ]
    })
}

/// Notes whose body contains `url` verbatim.
#[must_use]
pub fn mention_query(url: &str) -> Value {
    json!({"regexp": [regex::escape(url), {"var": "content"}]})
}

/// One item of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub filename: String,
    #[serde(default)]
    pub result: Value,
}

impl SearchHit {
    /// Whether the query evaluated truthy for this note.
    #[must_use]
    pub fn matched(&self) -> bool {
        match &self.result {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            _ => true,
        }
    }
}

pub(crate) fn into_records(hits: Vec<SearchHit>) -> Vec<MentionRecord> {
    hits.into_iter()
        .filter(SearchHit::matched)
        .map(|hit| MentionRecord::new(hit.filename))
        .collect()
}
