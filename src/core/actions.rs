use log::trace;
use std::fmt::Display;
use std::future::Future;
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPhase {
    Started,
    Completed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub store: &'static str,
    pub action: &'static str,
    pub phase: ActionPhase,
}

/// Broadcasts the lifecycle of async store actions so observers other than
/// the direct caller can follow in-flight, completed and failed work.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    tx: broadcast::Sender<ActionEvent>,
}

impl ActionDispatcher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActionEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, store: &'static str, action: &'static str, phase: ActionPhase) {
        trace!("{store}.{action}: {phase:?}");
        let _ = self.tx.send(ActionEvent {
            store,
            action,
            phase,
        });
    }

    pub async fn track<F, T, E>(&self, store: &'static str, action: &'static str, future: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.emit(store, action, ActionPhase::Started);
        let result = future.await;
        let phase = match &result {
            Ok(_) => ActionPhase::Completed,
            Err(e) => ActionPhase::Failed(e.to_string()),
        };
        self.emit(store, action, phase);
        result
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new(256)
    }
}
