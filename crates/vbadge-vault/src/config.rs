//! HTTP client configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use vbadge_core::{BadgeError, ConnectionSettings, DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT};

/// How to reach the vault once a host is known.
///
/// ```toml
/// http_port = 27123
/// https_port = 27124
/// accept_invalid_certs = false
/// ca_certificate = "/path/to/vault.crt"
/// # request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultClientConfig {
    pub http_port: u16,
    pub https_port: u16,
    /// Skip certificate verification entirely.
    pub accept_invalid_certs: bool,
    /// Extra PEM root to trust, typically the vault's self-signed certificate.
    pub ca_certificate: Option<PathBuf>,
    /// No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for VaultClientConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            https_port: DEFAULT_HTTPS_PORT,
            accept_invalid_certs: false,
            ca_certificate: None,
            request_timeout_secs: None,
        }
    }
}

impl VaultClientConfig {
    /// # Errors
    ///
    /// Returns [`BadgeError::Config`] on malformed TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, BadgeError> {
        toml::from_str(s).map_err(|e| BadgeError::Config(e.to_string()))
    }

    /// Plaintext port in insecure mode, TLS port otherwise.
    #[must_use]
    pub fn base_url(&self, settings: &ConnectionSettings) -> String {
        if settings.insecure_mode {
            format!("http://{}:{}", settings.host, self.http_port)
        } else {
            format!("https://{}:{}", settings.host, self.https_port)
        }
    }
}
