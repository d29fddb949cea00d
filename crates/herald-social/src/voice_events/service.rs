use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use herald_common::{
    new_correlation_id, Event, EventBus, EventKind, Notification, PresenceUpdate, SpeechEngine,
    SubscriptionId,
};
use herald_config::{HeraldConfig, MessageKey};
use tracing::{debug, error, info, info_span};

use crate::announcer::{Announcement, Announcer};
use crate::classifier::TransitionClassifier;
use crate::host::Host;
use crate::snapshot::StateSnapshot;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

struct Inner {
    classifier: TransitionClassifier,
    announcer: Announcer,
    config: Arc<HeraldConfig>,
    subscription: Option<SubscriptionId>,
}

/// State reachable from the bus handler.
struct Shared {
    host: Arc<dyn Host>,
    inner: Mutex<Inner>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, update: &PresenceUpdate) -> Option<Announcement> {
        let correlation_id = new_correlation_id();
        let span = info_span!(
            "voice_state_update",
            %correlation_id,
            user_id = %update.user_id,
            channel_id = ?update.channel_id,
        );
        let _enter = span.enter();

        let mut guard = self.lock();
        let inner = &mut *guard;
        if inner.subscription.is_none() {
            debug!("service stopped, update ignored");
            return None;
        }

        let local_user = self.host.local_user_id();
        let notification = inner
            .classifier
            .observe(update, &local_user, self.host.as_ref())?;
        debug!(kind = %notification.kind, channel_id = %notification.channel_id, "transition classified");

        match inner
            .announcer
            .announce(&notification, &inner.config, self.host.as_ref())
        {
            Ok(announcement) => Some(announcement),
            Err(e) => {
                error!(error = %e, ?update, kind = %notification.kind, "failed to announce voice state change");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// VoiceEvents
// ---------------------------------------------------------------------------

pub struct VoiceEvents {
    bus: Arc<EventBus>,
    shared: Arc<Shared>,
}

impl VoiceEvents {
    pub fn new(
        host: Arc<dyn Host>,
        bus: Arc<EventBus>,
        engine: Arc<dyn SpeechEngine>,
        config: HeraldConfig,
    ) -> Self {
        let inner = Inner {
            classifier: TransitionClassifier::new(),
            announcer: Announcer::new(engine),
            config: Arc::new(config),
            subscription: None,
        };
        Self {
            bus,
            shared: Arc::new(Shared {
                host,
                inner: Mutex::new(inner),
            }),
        }
    }

    /// Probe the speech engine, take the initial snapshot and subscribe to
    /// voice-state updates. Calling `start` twice is a no-op.
    pub fn start(&self) {
        let mut guard = self.shared.lock();
        let inner = &mut *guard;
        if inner.subscription.is_some() {
            debug!("voice events already running");
            return;
        }

        inner.announcer.check_voices();
        inner.classifier.rebuild(self.shared.host.as_ref());

        let shared = Arc::clone(&self.shared);
        let id = self.bus.subscribe(
            EventKind::VoiceStateUpdate,
            Arc::new(move |event: &Event| {
                if let Event::VoiceStateUpdate(update) = event {
                    shared.handle(update);
                }
            }),
        );
        inner.subscription = Some(id);

        info!(
            channel_id = ?inner.classifier.snapshot().observed_channel(),
            members = inner.classifier.snapshot().len(),
            "voice events started"
        );
    }

    /// Unsubscribe and forget the snapshot, atomically with respect to
    /// event handling.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        let Some(id) = inner.subscription.take() else {
            return;
        };
        self.bus.unsubscribe(EventKind::VoiceStateUpdate, id);
        inner.classifier.clear();
        info!("voice events stopped");
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().subscription.is_some()
    }

    /// Handle one update directly, bypassing the bus. Returns what happened
    /// to the notification, if the update produced one.
    pub fn handle_update(&self, update: &PresenceUpdate) -> Option<Announcement> {
        self.shared.handle(update)
    }

    /// Replace the active settings. Takes effect from the next update.
    pub fn update_settings(&self, config: HeraldConfig) {
        self.shared.lock().config = Arc::new(config);
        info!("voice event settings updated");
    }

    pub fn settings(&self) -> Arc<HeraldConfig> {
        Arc::clone(&self.shared.lock().config)
    }

    /// Speak a configured message with its placeholders read literally.
    pub fn preview(&self, key: MessageKey) -> Announcement {
        let mut guard = self.shared.lock();
        let inner = &mut *guard;
        inner.announcer.preview(key, &inner.config)
    }

    /// Take the queued diagnostics that have not yet expired.
    pub fn diagnostics(&self) -> Vec<Notification> {
        self.shared
            .lock()
            .announcer
            .diagnostics()
            .drain()
            .into_iter()
            .filter(|n| !n.is_expired())
            .collect()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.shared.lock().classifier.snapshot().clone()
    }
}

impl Drop for VoiceEvents {
    fn drop(&mut self) {
        self.stop();
    }
}
