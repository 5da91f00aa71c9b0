//! Scoped event subscriptions
//!
//! Adapters own an [`EventEmitter`] and hand out [`Subscription`]s.
//! A subscription stays registered for exactly as long as it is alive:
//! dropping it (on any path) removes the listener.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;

struct Listeners<E> {
    next_id: u64,
    senders: Vec<(u64, mpsc::UnboundedSender<E>)>,
}

/// Fan-out of events to every live subscription, in emission order
pub struct EventEmitter<E> {
    listeners: Arc<Mutex<Listeners<E>>>,
}

impl<E: Clone> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                senders: Vec::new(),
            })),
        }
    }

    /// Register a new listener
    pub fn subscribe(&self) -> Subscription<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = self.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.push((id, tx));

        Subscription {
            id,
            receiver: rx,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver an event to every listener.
    ///
    /// Returns the number of listeners that received it.
    pub fn emit(&self, event: E) -> usize {
        let mut listeners = self.listeners.lock();
        listeners
            .senders
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        listeners.senders.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().senders.len()
    }
}

impl<E: Clone> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventEmitter<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

/// Registration handle for one listener.
///
/// Unregisters itself when dropped.
pub struct Subscription<E> {
    id: u64,
    receiver: mpsc::UnboundedReceiver<E>,
    listeners: Weak<Mutex<Listeners<E>>>,
}

impl<E> Subscription<E> {
    /// Wait for the next event.
    ///
    /// Returns `None` once the emitter is gone and every queued event
    /// has been delivered.
    pub async fn recv(&mut self) -> Option<E> {
        self.receiver.recv().await
    }

    /// Take a queued event without waiting
    pub fn try_recv(&mut self) -> Option<E> {
        self.receiver.try_recv().ok()
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().senders.retain(|(id, _)| *id != self.id);
        }
    }
}

impl<E> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
