//! Input throttling latch

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

struct Pending<T> {
    deadline: Instant,
    value: T,
}

/// Latch that lets at most one input through per window.
///
/// The first input in a quiet period arms the latch. Inputs while armed
/// are not dispatched on their own, but the value handed out when the
/// window closes is always the most recent one.
pub struct Throttle<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Throttle<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Offer an input.
    ///
    /// # Returns
    /// `true` if this input armed a new window, `false` if it was folded
    /// into the window already in progress
    pub fn offer(&mut self, value: T) -> bool {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.value = value;
                false
            }
            None => {
                self.pending = Some(Pending {
                    deadline: Instant::now() + self.delay,
                    value,
                });
                true
            }
        }
    }

    /// Drop the pending window without dispatching it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Wait for the armed window to close and take its value.
    ///
    /// Never completes while the latch is disarmed. Cancel-safe: if the
    /// future is dropped early the window stays armed.
    pub async fn settled(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|p| p.deadline) else {
            return std::future::pending().await;
        };

        sleep_until(deadline).await;

        match self.pending.take() {
            Some(pending) => pending.value,
            None => std::future::pending().await,
        }
    }
}
