//! The host's URL fragment and its change notifications.
//!
//! [`Location`] stands in for the browser location: it holds the current
//! fragment and notifies subscribers whenever it changes. Subscribers receive
//! notifications over an `mpsc` channel and drain them on their own schedule,
//! so a notification is never delivered re-entrantly while the shell is in
//! the middle of handling another event.

use std::sync::mpsc::{self, Receiver, Sender};

/// A fragment-change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChange {
    pub old_fragment: String,
    pub new_fragment: String,
}

/// Current URL fragment plus its subscriber list.
#[derive(Debug, Default)]
pub struct Location {
    fragment: String,
    subscribers: Vec<(u64, Sender<HashChange>)>,
    next_id: u64,
}

impl Location {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            ..Self::default()
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Set the fragment. Subscribers are notified only when the value
    /// actually changes, matching how browsers fire `hashchange`.
    ///
    /// Returns whether a notification was sent.
    pub fn set_fragment(&mut self, fragment: impl Into<String>) -> bool {
        let fragment = fragment.into();
        if fragment == self.fragment {
            return false;
        }
        let change = HashChange {
            old_fragment: std::mem::replace(&mut self.fragment, fragment),
            new_fragment: self.fragment.clone(),
        };
        // Drop subscribers whose receiving end is gone.
        self.subscribers
            .retain(|(_, tx)| tx.send(change.clone()).is_ok());
        true
    }

    /// Register for fragment-change notifications.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, tx));
        Subscription { id, rx }
    }

    /// Remove a subscription. Pending notifications are discarded with it.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|(id, _)| *id != subscription.id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of a [`Location`] subscription.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: Receiver<HashChange>,
}

impl Subscription {
    /// Take every notification received so far, in receipt order.
    pub fn drain(&self) -> Vec<HashChange> {
        self.rx.try_iter().collect()
    }
}
