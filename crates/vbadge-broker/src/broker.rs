//! Permission and shortcut message broker.

use std::sync::Arc;

use tokio::sync::oneshot;

use vbadge_core::{DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT};

use crate::message::{BackgroundRequest, BrokerReply};
use crate::runtime::{ExtensionRuntime, EXECUTE_ACTION_COMMAND};

/// Origin patterns covering both API ports of `host`: plaintext and TLS.
#[must_use]
pub fn host_origins(host: &str) -> Vec<String> {
    vec![
        format!("http://{host}:{DEFAULT_HTTP_PORT}/*"),
        format!("https://{host}:{DEFAULT_HTTPS_PORT}/*"),
    ]
}

/// Answers popup requests using the host runtime. Every request gets
/// exactly one reply, always delivered asynchronously.
pub struct PermissionMessageBroker {
    runtime: Arc<dyn ExtensionRuntime>,
}

impl PermissionMessageBroker {
    pub fn new(runtime: Arc<dyn ExtensionRuntime>) -> Self {
        Self { runtime }
    }

    /// Start handling `request` and return the channel its reply will
    /// arrive on.
    pub fn dispatch(self: &Arc<Self>, request: BackgroundRequest) -> oneshot::Receiver<BrokerReply> {
        let (tx, rx) = oneshot::channel();
        let broker = self.clone();
        tokio::spawn(async move {
            let reply = broker.handle(request).await;
            if tx.send(reply).is_err() {
                tracing::debug!("message sender went away before the reply");
            }
        });
        rx
    }

    pub async fn handle(&self, request: BackgroundRequest) -> BrokerReply {
        match request {
            BackgroundRequest::CheckHasHostPermission { host } => {
                let Some(host) = host.filter(|h| !h.is_empty()) else {
                    tracing::warn!("permission check without host");
                    return BrokerReply::Granted(false);
                };
                let granted = self.runtime.contains_origins(&host_origins(&host)).await;
                tracing::debug!(host = %host, granted, "host permission checked");
                BrokerReply::Granted(granted)
            }
            BackgroundRequest::RequestHostPermission { host } => {
                let Some(host) = host.filter(|h| !h.is_empty()) else {
                    tracing::warn!("permission request without host");
                    return BrokerReply::Granted(false);
                };
                let granted = self.runtime.request_origins(&host_origins(&host)).await;
                tracing::info!(host = %host, granted, "host permission requested");
                BrokerReply::Granted(granted)
            }
            BackgroundRequest::CheckKeyboardShortcut => {
                let shortcut = self
                    .runtime
                    .commands()
                    .await
                    .into_iter()
                    .find(|c| c.name == EXECUTE_ACTION_COMMAND)
                    .and_then(|c| c.shortcut);
                BrokerReply::Shortcut(shortcut)
            }
        }
    }
}
