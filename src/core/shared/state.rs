use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

/// Holds a store's state and notifies subscribers whenever it is replaced.
///
/// State is only ever swapped as a whole, so a subscriber never observes a
/// half-applied update.
#[derive(Debug)]
pub struct StateStore<S: Clone> {
    state: RwLock<S>,
    tx: broadcast::Sender<S>,
}

impl<S: Clone> StateStore<S> {
    pub fn new(initial: S, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            state: RwLock::new(initial),
            tx,
        }
    }

    pub fn state(&self) -> S {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<S> {
        self.tx.subscribe()
    }

    /// Swaps in `next` and broadcasts it once.
    pub fn replace(&self, next: S) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next.clone();
        // Sending while holding the lock keeps broadcast order equal to
        // replacement order.
        let _ = self.tx.send(next);
    }
}
