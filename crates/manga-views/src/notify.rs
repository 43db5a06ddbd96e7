//! Toast notifications.
//!
//! A screen shows one toast at a time; a new one replaces the last. Every
//! toast raised is also kept in order so a non-visual front end can print
//! them all.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    raised: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let notification = Notification {
            kind,
            message: message.into(),
        };
        tracing::debug!(?notification.kind, message = %notification.message, "notification");
        self.raised.push(notification);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    /// The toast currently on screen.
    pub fn current(&self) -> Option<&Notification> {
        self.raised.last()
    }

    pub fn all(&self) -> &[Notification] {
        &self.raised
    }

    /// Take every toast raised so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.raised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_toast_replaces_the_visible_one() {
        let mut notes = Notifications::new();
        notes.error("falhou");
        notes.success("ok");
        assert_eq!(notes.current().map(|n| n.kind), Some(NotificationKind::Success));
        assert_eq!(notes.all().len(), 2);
        assert_eq!(notes.drain().len(), 2);
        assert!(notes.current().is_none());
    }
}
