use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A message meant for the person using the client, as opposed to a log
/// line meant for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub title: String,
}

impl Notification {
    pub fn error(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            title: title.into(),
        }
    }

    pub fn warning(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
            title: title.into(),
        }
    }

    pub fn success(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            title: title.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => error!("{}: {}", notification.title, notification.message),
            NotificationLevel::Warning => warn!("{}: {}", notification.title, notification.message),
            NotificationLevel::Success => info!("{}: {}", notification.title, notification.message),
        }
    }
}

/// Publishes notifications to any number of UI subscribers.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        LogNotifier.notify(notification.clone());
        // No subscribers is fine: the log line above still records it.
        let _ = self.tx.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_notifier_delivers_to_subscribers() {
        let notifier = ChannelNotifier::default();
        let mut rx = notifier.subscribe();

        notifier.notify(Notification::error("boom", "Could not retrieve views"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.level, NotificationLevel::Error);
        assert_eq!(received.title, "Could not retrieve views");
        assert_eq!(received.message, "boom");
    }

    #[test]
    fn test_notify_without_subscribers_does_not_panic() {
        ChannelNotifier::new(1).notify(Notification::success("saved", "View saved"));
    }
}
