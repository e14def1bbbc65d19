//! Auth state-change notifications.
//!
//! The client emits an event after every operation that changes the session
//! (sign-in, sign-out, token refresh). Views subscribe, keep a local cached
//! copy of the latest session, and release the subscription on teardown.
//! Events carry the full session-or-absent payload, so overwriting local
//! state from the latest event is always safe (last-write-wins).

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;

use super::Session;

/// Kind of auth state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// A state-change notification with the session that is now current.
#[derive(Debug, Clone)]
pub struct AuthEvent {
    pub change: AuthChange,
    pub session: Option<Session>,
}

struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, mpsc::UnboundedSender<AuthEvent>)>,
}

/// Fan-out hub for auth state changes.
pub struct AuthEvents {
    inner: Mutex<HubInner>,
}

impl AuthEvents {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(HubInner {
                next_id: 0,
                subscribers: Vec::new(),
            }),
        })
    }

    /// Registers a subscriber and returns its handle.
    ///
    /// The handle must be released (explicitly or by drop) or the hub keeps
    /// a dead sender around for the process lifetime.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut inner = self.inner.lock().expect("auth hub lock poisoned");
            let id = inner.next_id;
            inner.next_id = inner.next_id.wrapping_add(1);
            inner.subscribers.push((id, tx));
            id
        };
        Subscription {
            id,
            hub: Arc::downgrade(self),
            rx,
            released: false,
        }
    }

    /// Delivers an event to every live subscriber.
    pub fn emit(&self, event: &AuthEvent) {
        let inner = self.inner.lock().expect("auth hub lock poisoned");
        for (_, tx) in &inner.subscribers {
            let _ = tx.send(event.clone());
        }
    }

    fn remove(&self, id: u64) {
        let mut inner = self.inner.lock().expect("auth hub lock poisoned");
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.lock().expect("auth hub lock poisoned").subscribers.len()
    }
}

/// Handle to a hub registration.
///
/// Receives events until released. Dropping the handle releases it; calling
/// [`Subscription::unsubscribe`] first is equivalent and idempotent.
pub struct Subscription {
    id: u64,
    hub: Weak<AuthEvents>,
    rx: mpsc::UnboundedReceiver<AuthEvent>,
    released: bool,
}

impl Subscription {
    /// Receives the next event, waiting if none is queued.
    ///
    /// Returns `None` once unsubscribed and the queue is drained.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        self.rx.recv().await
    }

    /// Non-blocking receive for frame-loop polling.
    pub fn try_recv(&mut self) -> Option<AuthEvent> {
        self.rx.try_recv().ok()
    }

    /// Removes this subscriber from the hub. Safe to call more than once;
    /// only the first call does anything.
    pub fn unsubscribe(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(self.id);
        }
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
