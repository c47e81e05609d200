use std::time::Duration;

use crate::config::MESSAGE_TTL;
use crate::utils::app_time::{AppInstant, now};

/// Top-level lifecycle of a mounted panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelStatus {
    /// Waiting for the first snapshot
    #[default]
    Loading,
    /// Mirroring the stored document
    Ready,
    /// Terminal for this mount; only a reload leaves it
    Error(String),
}

impl PanelStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, PanelStatus::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Warning,
    Failure,
}

/// A transient banner shown under the form
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
    shown_at: AppInstant,
    ttl: Duration,
}

impl StatusMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: now(),
            ttl: MESSAGE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn is_expired_at(&self, instant: AppInstant) -> bool {
        instant.saturating_duration_since(self.shown_at) >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_ttl() {
        let message = StatusMessage::new(MessageKind::Success, "saved");
        let shown_at = message.shown_at;
        assert!(!message.is_expired_at(shown_at));
        assert!(!message.is_expired_at(shown_at + MESSAGE_TTL / 2));
        assert!(message.is_expired_at(shown_at + MESSAGE_TTL));
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let message = StatusMessage::new(MessageKind::Failure, "boom").with_ttl(Duration::ZERO);
        assert!(message.is_expired());
    }
}
