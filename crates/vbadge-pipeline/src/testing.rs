//! In-memory collaborators for pipeline tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use vbadge_core::{
    BadgeError, ConnectionSettings, Frontmatter, MentionFetcher, MentionRecord, MentionSet,
    NoteContent, NoteContentFetcher, Result, SettingsSource,
};

pub struct StaticSettings(pub Option<ConnectionSettings>);

impl StaticSettings {
    pub fn complete() -> Self {
        Self(Some(ConnectionSettings::new("127.0.0.1", "key")))
    }
}

#[async_trait]
impl SettingsSource for StaticSettings {
    async fn load(&self) -> Result<Option<ConnectionSettings>> {
        Ok(self.0.clone())
    }
}

pub struct FailingSettings;

#[async_trait]
impl SettingsSource for FailingSettings {
    async fn load(&self) -> Result<Option<ConnectionSettings>> {
        Err(BadgeError::Settings("unreadable".to_string()))
    }
}

pub fn set(direct: &[&str], mentions: &[&str]) -> MentionSet {
    MentionSet {
        direct: direct.iter().map(|f| MentionRecord::new(*f)).collect(),
        mentions: mentions.iter().map(|f| MentionRecord::new(*f)).collect(),
    }
}

/// Answers per URL; unknown URLs fail with a transport error. A URL can be
/// held back until [`ScriptedMentions::release`] is called.
#[derive(Default)]
pub struct ScriptedMentions {
    answers: HashMap<String, MentionSet>,
    held: Mutex<HashMap<String, Arc<Notify>>>,
    pub entered: Arc<Notify>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedMentions {
    pub fn with(mut self, url: &str, set: MentionSet) -> Self {
        self.answers.insert(url.to_string(), set);
        self
    }

    pub fn hold(self, url: &str) -> Self {
        self.held
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn release(&self, url: &str) {
        if let Some(gate) = self.held.lock().unwrap().get(url) {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl MentionFetcher for ScriptedMentions {
    async fn fetch_mentions(&self, _settings: &ConnectionSettings, url: &str) -> Result<MentionSet> {
        self.calls.lock().unwrap().push(url.to_string());
        let gate = self.held.lock().unwrap().get(url).cloned();
        if let Some(gate) = gate {
            self.entered.notify_one();
            gate.notified().await;
        }
        self.answers
            .get(url)
            .cloned()
            .ok_or_else(|| BadgeError::Transport(format!("connection refused for {url}")))
    }
}

/// Frontmatter per filename; unknown files answer 404.
#[derive(Default)]
pub struct ScriptedNotes {
    notes: HashMap<String, Frontmatter>,
    pub fetched: Mutex<Vec<String>>,
}

impl ScriptedNotes {
    pub fn with(mut self, filename: &str, frontmatter: Value) -> Self {
        let frontmatter: Frontmatter = serde_json::from_value(frontmatter).unwrap();
        self.notes.insert(filename.to_string(), frontmatter);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteContentFetcher for ScriptedNotes {
    async fn fetch_note(
        &self,
        _settings: &ConnectionSettings,
        filename: &str,
    ) -> Result<NoteContent> {
        self.fetched.lock().unwrap().push(filename.to_string());
        let frontmatter = self.notes.get(filename).cloned().ok_or(BadgeError::Http {
            status: 404,
            body: format!("{filename} not found"),
        })?;
        Ok(NoteContent {
            path: Some(filename.to_string()),
            frontmatter,
            ..NoteContent::default()
        })
    }
}
