//! Increment-only counter telling list views to re-fetch.

use std::sync::Arc;

use tokio::sync::watch;

/// A shared refresh trigger.
///
/// Upload completion calls [`bump`](RefreshBus::bump); views that list
/// documents compare the current value with the one they last fetched for.
/// Only a change matters, never the magnitude. Cloning yields a handle to the
/// same counter.
#[derive(Clone, Debug)]
pub struct RefreshBus {
    sender: Arc<watch::Sender<u64>>,
}

impl RefreshBus {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Increments the counter by one and returns the new value.
    ///
    /// Works with no subscriber; there is no debouncing.
    pub fn bump(&self) -> u64 {
        let mut next = 0;
        self.sender.send_modify(|value| {
            *value += 1;
            next = *value;
        });
        tracing::debug!(refresh_token = next, "refresh bus bumped");
        next
    }

    pub fn current(&self) -> u64 {
        *self.sender.borrow()
    }

    /// Subscribes a consumer, starting from the current value.
    pub fn subscribe(&self) -> RefreshListener {
        RefreshListener {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of a [`RefreshBus`], handed to list views.
#[derive(Debug, Clone)]
pub struct RefreshListener {
    receiver: watch::Receiver<u64>,
}

impl RefreshListener {
    pub fn current(&self) -> u64 {
        *self.receiver.borrow()
    }
}
