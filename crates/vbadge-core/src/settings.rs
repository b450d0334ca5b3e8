//! Vault connection settings.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Plaintext port of the vault's REST API.
pub const DEFAULT_HTTP_PORT: u16 = 27123;

/// TLS port of the vault's REST API.
pub const DEFAULT_HTTPS_PORT: u16 = 27124;

/// Where and how to reach the vault.
///
/// Accepts both the camelCase keys the extension stores (`apiKey`,
/// `insecureMode`) and snake_case ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    #[serde(default)]
    pub host: String,
    #[serde(default, alias = "api_key")]
    pub api_key: String,
    #[serde(default, alias = "insecure_mode", deserialize_with = "null_as_false")]
    pub insecure_mode: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl ConnectionSettings {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            insecure_mode: false,
        }
    }

    /// Lookups need both a host and an API key.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.api_key.is_empty()
    }
}

/// Source of persisted settings. Read again for every navigation; `None`
/// means nothing was ever saved.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn load(&self) -> Result<Option<ConnectionSettings>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_storage_shape_deserializes() {
        let settings: ConnectionSettings = serde_json::from_str(
            r#"{"version": "1", "host": "127.0.0.1", "apiKey": "k", "insecureMode": true}"#,
        )
        .expect("deserialize");
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.api_key, "k");
        assert!(settings.insecure_mode);
        assert!(settings.is_complete());
    }

    #[test]
    fn insecure_mode_defaults_to_false() {
        let settings: ConnectionSettings =
            serde_json::from_str(r#"{"host": "h", "api_key": "k"}"#).expect("deserialize");
        assert!(!settings.insecure_mode);
        assert!(settings.is_complete());
    }

    #[test]
    fn null_insecure_mode_reads_as_false() {
        let settings: ConnectionSettings =
            serde_json::from_str(r#"{"host": "h", "apiKey": "k", "insecureMode": null}"#)
                .expect("deserialize");
        assert!(!settings.insecure_mode);
        assert!(settings.is_complete());
    }

    #[test]
    fn missing_host_or_key_is_incomplete() {
        assert!(!ConnectionSettings::new("", "k").is_complete());
        assert!(!ConnectionSettings::new("h", "").is_complete());
        assert!(!ConnectionSettings::default().is_complete());
    }
}
