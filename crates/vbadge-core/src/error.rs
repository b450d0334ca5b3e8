//! Error types for vbadge.

use thiserror::Error;

use crate::badge::TabId;

/// Top-level result type for vbadge operations.
pub type Result<T> = std::result::Result<T, BadgeError>;

/// Top-level error type for vbadge.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The request never produced a response (connection refused, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("vault responded with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("config error: {0}")]
    Config(String),

    /// A newer navigation of the same tab owns the badge now.
    #[error("superseded by a newer navigation of tab {0}")]
    Superseded(TabId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BadgeError {
    /// Whether this error only means the result went stale.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = BadgeError::Http {
            status: 401,
            body: "unauthorized".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("unauthorized"));

        let err = BadgeError::Superseded(TabId(7));
        assert!(err.to_string().contains("tab 7"));
        assert!(err.is_superseded());
        assert!(!BadgeError::Decode("x".to_string()).is_superseded());
    }
}
