use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, UserId};

/// A user's new voice-channel membership. `channel_id: None` means the
/// user left voice entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    pub user_id: UserId,
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
}

impl PresenceUpdate {
    pub fn new(user_id: impl Into<UserId>, channel_id: Option<ChannelId>) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    VoiceStateUpdate(PresenceUpdate),
    #[serde(other)]
    Unknown,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::VoiceStateUpdate(_) => EventKind::VoiceStateUpdate,
            Event::Unknown => EventKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    VoiceStateUpdate,
    Unknown,
}

/// Token returned by [`EventBus::subscribe`]; hand it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Synchronous event source. `publish` runs every matching handler to
/// completion, in subscription order, before returning.
pub struct EventBus {
    handlers: Mutex<Vec<(EventKind, SubscriptionId, Handler)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, id, handler));
        tracing::debug!(?kind, subscription = id.0, "handler subscribed");
        id
    }

    /// Returns `false` if no handler with that id was registered for `kind`.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(k, sid, _)| !(*k == kind && *sid == id));
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!(?kind, subscription = id.0, "handler unsubscribed");
        }
        removed
    }

    /// Dispatch an event, returning the number of handlers invoked.
    pub fn publish(&self, event: Event) -> usize {
        let kind = event.kind();
        // Handlers run outside the lock so they may unsubscribe themselves.
        let matching: Vec<Handler> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, _, h)| Arc::clone(h))
            .collect();

        for handler in &matching {
            handler(&event);
        }
        matching.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
