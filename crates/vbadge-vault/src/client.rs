//! HTTP client for the vault's REST API.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Certificate, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use vbadge_core::frontmatter::parse_markdown_frontmatter;
use vbadge_core::{
    BadgeError, ConnectionSettings, MentionFetcher, MentionSet, NoteContent, NoteContentFetcher,
    Result,
};

use crate::config::VaultClientConfig;
use crate::search::{
    direct_mention_query, into_records, mention_query, SearchHit, JSONLOGIC_MEDIA_TYPE,
};

/// Note-with-metadata representation: JSON with parsed frontmatter.
pub const NOTE_JSON_MEDIA_TYPE: &str = "application/vnd.olrapi.note+json";

/// Client for one vault configuration. Connection settings are passed per
/// call so they can change between navigations.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: Client,
    config: VaultClientConfig,
}

impl VaultClient {
    /// Build a client honoring the TLS and timeout options in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BadgeError::Config`] if the CA certificate cannot be read
    /// or parsed, or the HTTP client cannot be built.
    pub fn new(config: VaultClientConfig) -> Result<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(path) = &config.ca_certificate {
            let pem = std::fs::read(path).map_err(|e| {
                BadgeError::Config(format!("cannot read CA certificate {}: {e}", path.display()))
            })?;
            let cert = Certificate::from_pem(&pem)
                .map_err(|e| BadgeError::Config(format!("invalid CA certificate: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| BadgeError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub fn with_client(http: Client, config: VaultClientConfig) -> Self {
        Self { http, config }
    }

    fn url(&self, settings: &ConnectionSettings, path: &str) -> String {
        format!("{}{}", self.config.base_url(settings), path)
    }

    async fn send(&self, settings: &ConnectionSettings, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&settings.api_key)
            .send()
            .await
            .map_err(|e| BadgeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BadgeError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BadgeError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| BadgeError::Decode(e.to_string()))
    }

    /// Run a JsonLogic search and return the notes it matched, in order.
    ///
    /// # Errors
    ///
    /// Transport, HTTP status, and decode failures.
    pub async fn search(
        &self,
        settings: &ConnectionSettings,
        query: &Value,
    ) -> Result<Vec<SearchHit>> {
        let body =
            serde_json::to_vec(query).map_err(|e| BadgeError::Decode(e.to_string()))?;
        let request = self
            .http
            .post(self.url(settings, "/search/"))
            .header(CONTENT_TYPE, JSONLOGIC_MEDIA_TYPE)
            .body(body);
        let response = self.send(settings, request).await?;
        Self::decode(response).await
    }
}

/// `/vault/<filename>` with each path segment percent-encoded.
#[must_use]
pub fn note_path(filename: &str) -> String {
    let encoded: Vec<String> = filename
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/vault/{}", encoded.join("/"))
}

#[async_trait]
impl MentionFetcher for VaultClient {
    async fn fetch_mentions(&self, settings: &ConnectionSettings, url: &str) -> Result<MentionSet> {
        let direct = into_records(self.search(settings, &direct_mention_query(url)).await?);
        let mentions = into_records(self.search(settings, &mention_query(url)).await?);
        tracing::debug!(
            url,
            direct = direct.len(),
            mentions = mentions.len(),
            "mention lookup finished"
        );
        Ok(MentionSet { direct, mentions })
    }
}

#[async_trait]
impl NoteContentFetcher for VaultClient {
    async fn fetch_note(
        &self,
        settings: &ConnectionSettings,
        filename: &str,
    ) -> Result<NoteContent> {
        let request = self
            .http
            .get(self.url(settings, &note_path(filename)))
            .header(ACCEPT, NOTE_JSON_MEDIA_TYPE);
        let response = self.send(settings, request).await?;

        let is_markdown = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/markdown"));

        if is_markdown {
            let content = response
                .text()
                .await
                .map_err(|e| BadgeError::Transport(e.to_string()))?;
            let frontmatter = parse_markdown_frontmatter(&content)?;
            return Ok(NoteContent {
                path: Some(filename.to_string()),
                content,
                frontmatter,
                tags: Vec::new(),
            });
        }

        Self::decode(response).await
    }
}
